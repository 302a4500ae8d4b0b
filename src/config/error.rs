//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Worker count must be at least one.
    #[error("invalid worker count '{value}': must be at least 1")]
    InvalidWorkers { value: String },

    /// Worker count string could not be parsed as a number.
    #[error("failed to parse worker count '{value}': {source}")]
    WorkersParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Timeout string could not be parsed as milliseconds.
    #[error("failed to parse timeout '{value}': {source}")]
    TimeoutParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Timeout must be non-zero.
    #[error("invalid timeout '{value}': must be non-zero")]
    InvalidTimeout { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
