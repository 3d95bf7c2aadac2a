//! Media storage configuration.
//!
//! Uploaded receipts are written below a media root directory, taken from the
//! `FINAID_MEDIA_ROOT` environment variable.

use std::path::PathBuf;

const DEFAULT_MEDIA_ROOT: &str = "media";

/// Gets the directory receipts are stored under.
#[must_use]
pub fn get_media_root() -> PathBuf {
    std::env::var("FINAID_MEDIA_ROOT")
        .map_or_else(|_| PathBuf::from(DEFAULT_MEDIA_ROOT), PathBuf::from)
}
