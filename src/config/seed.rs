//! Seed data loading from config.toml
//!
//! Application periods and bulk-mail templates are admin-managed. Listing them
//! in `config.toml` lets a fresh database start with the current conference's
//! windows and templates; see [`crate::core::seed`] for how they are applied.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct SeedConfig {
    /// Windows during which applications are accepted
    #[serde(default)]
    pub periods: Vec<PeriodConfig>,
    /// Bulk-mail templates
    #[serde(default)]
    pub email_templates: Vec<EmailTemplateConfig>,
}

/// A single application period, both bounds exclusive
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodConfig {
    /// RFC 3339 start of the window
    pub start: DateTime<Utc>,
    /// RFC 3339 end of the window
    pub end: DateTime<Utc>,
}

/// A named bulk-mail template
#[derive(Debug, Clone, Deserialize)]
pub struct EmailTemplateConfig {
    /// Template name, unique among seeded templates
    pub name: String,
    /// Template body referencing `application` and `review`
    pub template: String,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A timestamp is not RFC 3339
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from `./config.toml`, or an empty configuration
/// when the file does not exist.
pub fn load_default_config() -> Result<SeedConfig> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        tracing::warn!("config.toml not found, starting without seed data");
        Ok(SeedConfig::default())
    }
}
