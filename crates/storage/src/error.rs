//! Error types for the storage layer

use thiserror::Error;

/// Errors raised by storage adapters and the log store
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error from a file-backed adapter
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be mapped onto the backend
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Backend-specific failure
    #[error("backend error: {0}")]
    Backend(String),

    /// Log could not be encoded
    #[error(transparent)]
    Core(#[from] actionlog_core::Error),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
