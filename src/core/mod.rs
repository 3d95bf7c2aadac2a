//! Core business logic - framework-agnostic operations over the financial aid tables.
//!
//! Every operation takes the connection explicitly and, where time matters,
//! the current time as a `now` argument.

/// Status-gated applicant actions
pub mod actions;
/// Submission, editing and status derivation
pub mod application;
/// Bulk-mail templates and rendering
pub mod email;
/// Applicant/reviewer messages and read tracking
pub mod message;
/// Dollar amount validation
pub mod money;
/// Application period gating
pub mod period;
/// Receipt uploads
pub mod receipt;
/// Reviewer data edits
pub mod review;
/// Seeding from config.toml
pub mod seed;
/// Minimal user records
pub mod user;
