//! Error types for configuration and preference storage.
use thiserror::Error;

/// Top-level core error type.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Preference storage error: {0}")]
    Preference(String),
}
