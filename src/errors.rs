//! Unified error type for the financial aid data layer.
//!
//! Storage errors are surfaced unmodified; the remaining variants cover the
//! few conditions the lifecycle operations check before touching the database.

use crate::entities::Status;
use rust_decimal::Decimal;
use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reported by the persistence layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error while storing an uploaded receipt
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Mail context could not be built from the stored rows
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// No application row with this id
    #[error("Financial aid application {id} not found")]
    ApplicationNotFound {
        /// Application id that was looked up
        id: i64,
    },

    /// No user row with this id
    #[error("User {id} not found")]
    UserNotFound {
        /// User id that was looked up
        id: i64,
    },

    /// No receipt row with this id
    #[error("Receipt {id} not found")]
    ReceiptNotFound {
        /// Receipt id that was looked up
        id: i64,
    },

    /// The user already owns an application
    #[error("User {user_id} has already submitted a financial aid application")]
    DuplicateApplication {
        /// Owner of the existing application
        user_id: i64,
    },

    /// Submission attempted outside every application period
    #[error("Financial aid applications are not open")]
    ApplicationsClosed,

    /// Applicant fields may only change while the application is Submitted
    #[error("Application can no longer be edited (status: {status})")]
    NotEditable {
        /// Status that blocked the edit
        status: Status,
    },

    /// Monetary amount outside the allowed range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Username that is empty or unusable as an upload directory name
    #[error("Invalid username: {username:?}")]
    InvalidUsername {
        /// The rejected username
        username: String,
    },

    /// Receipt filename that would escape the user's upload directory
    #[error("Invalid receipt filename: {filename:?}")]
    InvalidFilename {
        /// The rejected filename
        filename: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
