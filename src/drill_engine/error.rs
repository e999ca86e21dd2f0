use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: Option<PathBuf>,
    },
    #[error("invalid configuration {path:?}: {source}")]
    Invalid {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

/// Failures from a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o for key '{key}' failed: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        key: String,
    },
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}
