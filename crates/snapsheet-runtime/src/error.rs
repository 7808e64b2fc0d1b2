#![forbid(unsafe_code)]

//! Runtime errors.

use snapsheet_core::SheetError;
use thiserror::Error;

/// Failure to load or validate a [`SheetPolicy`](crate::config::SheetPolicy).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "policy-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "policy-config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid policy: {0}")]
    Invalid(#[from] SheetError),
}
