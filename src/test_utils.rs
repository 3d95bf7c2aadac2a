//! Shared test utilities.
//!
//! Provides an in-memory database with every table created and helpers for
//! creating users, periods and applications with sensible defaults. All
//! timestamps come from [`at`], which pins tests to a single day.

use crate::{
    config::database::create_tables,
    core::{
        application::{ApplicationForm, ApplicationRecord, submit_application},
        period, user,
    },
    entities::{ExperienceLevel, Presenting, application_period, user as user_entity},
    errors::Result,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// 2026-03-01 at `hour:minute` UTC.
///
/// # Panics
/// Panics on an out-of-range hour or minute.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, minute, 0).unwrap()
}

/// Creates a user named `username` with an example.org address.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<user_entity::Model> {
    user::create_user(db, username, &format!("{username}@example.org")).await
}

/// Opens applications from 10:00 to 12:00 on the test day.
pub async fn create_open_period(db: &DatabaseConnection) -> Result<application_period::Model> {
    period::create_period(db, at(10, 0), at(12, 0)).await
}

/// A complete application form.
///
/// # Defaults
/// * `amount_requested`: 1200.00
/// * `profession`: "Research engineer"
/// * `presenting`: No, `experience_level`: Intermediate, `first_time`: true
#[must_use]
pub fn sample_form() -> ApplicationForm {
    ApplicationForm {
        pyladies_grant_requested: false,
        international: true,
        amount_requested: Decimal::new(1200, 0),
        travel_plans: "Flying in from Nairobi".to_string(),
        profession: "Research engineer".to_string(),
        involvement: "Organizes a local meetup".to_string(),
        what_you_want: "Data pipelines; hoping to meet maintainers".to_string(),
        presenting: Presenting::No,
        experience_level: ExperienceLevel::Intermediate,
        first_time: true,
        presented: false,
    }
}

/// Creates a user and submits [`sample_form`] for them at 10:45.
///
/// Requires an open period; see [`create_open_period`].
pub async fn create_test_application(
    db: &DatabaseConnection,
    username: &str,
) -> Result<ApplicationRecord> {
    let owner = create_test_user(db, username).await?;
    submit_application(db, owner.id, sample_form(), at(10, 45)).await
}

/// Sets up a database with an open period and one submitted application
/// owned by `applicant`.
pub async fn setup_with_application() -> Result<(DatabaseConnection, ApplicationRecord)> {
    let db = setup_test_db().await?;
    create_open_period(&db).await?;
    let record = create_test_application(&db, "applicant").await?;
    Ok((db, record))
}
