//! Core error types for gardeplan-core.
//!
//! Only the storage boundary can fail: inconsistent staffing rules are
//! domain data reported as [`Issue`](crate::harmonize::Issue) values by the
//! checker, never as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gardeplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration and rule-file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load a configuration or rule file
    #[error("Failed to load {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save a configuration or rule file
    #[error("Failed to save {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse TOML content
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Failed to encode TOML content
    #[error("Failed to encode configuration: {0}")]
    EncodeFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
