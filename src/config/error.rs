//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    NumberParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A boolean setting was not one of `true/false/1/0/yes/no/on/off`.
    #[error("invalid boolean {name}='{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// A result width (`top_k_*`) was zero.
    #[error("{field} must be at least 1")]
    ZeroWidth { field: &'static str },

    /// The minimum relevance score was above 100.
    #[error("min_relevance_score {value} is outside 0..=100")]
    ScoreOutOfRange { value: u32 },

    /// Oracle concurrency was zero.
    #[error("oracle concurrency must be at least 1")]
    ZeroConcurrency,

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
