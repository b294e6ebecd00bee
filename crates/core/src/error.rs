//! Error types for the core crate

use thiserror::Error;

/// Errors raised by configuration validation and the log codec
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration value out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Log could not be encoded to text
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
