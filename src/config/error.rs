//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Alpha must be finite and non-negative.
    #[error("invalid alpha '{value}': must be finite and >= 0")]
    InvalidAlpha { value: String },

    /// A numeric environment variable could not be parsed as a float.
    #[error("failed to parse {name} '{value}': {source}")]
    FloatParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A numeric environment variable could not be parsed as an integer.
    #[error("failed to parse {name} '{value}': {source}")]
    IntParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The result cap must be at least 1.
    #[error("invalid result cap '{value}': must be at least 1")]
    InvalidResultCap { value: String },

    /// The max-sources ceiling may not exceed the result cap.
    #[error("max_sources {max_sources} exceeds result cap {result_cap}")]
    MaxSourcesExceedsCap {
        max_sources: usize,
        result_cap: usize,
    },

    /// A publication type in the allow-list was not recognised.
    #[error("unknown publication type: '{value}'")]
    UnknownPublicationType { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
