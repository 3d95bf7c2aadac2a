/// Database configuration and connection management
pub mod database;

/// Media root for uploaded receipts
pub mod media;

/// Application period and email template seed data from config.toml
pub mod seed;
