//! Unified error types for actionlog.
//!
//! This module provides a clean error type that wraps the core and storage
//! errors and presents a consistent interface to users.
//!
//! Most operations are fail-open and never return these: recording an action,
//! reading the log and running queries degrade silently. Errors surface from
//! construction, explicit log replacement and history flushes.

use actionlog_storage::StorageError;
use thiserror::Error;

/// All actionlog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected at build time
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Storage key cannot be used by the backend
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Storage backend error
    #[error("storage error: {0}")]
    Storage(String),

    /// The flush sink reported a failure after the marks were persisted
    #[error("flush sink failed: {0}")]
    Sink(#[source] anyhow::Error),
}

/// Result type for actionlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from the storage layer.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Storage(_) | Error::InvalidKey(_) | Error::Serialization(_)
        )
    }

    /// Check if this error came from the flush sink.
    ///
    /// When true, the flushed entries were already marked in storage.
    pub fn is_sink(&self) -> bool {
        matches!(self, Error::Sink(_))
    }
}

// Convert from core errors
impl From<actionlog_core::Error> for Error {
    fn from(e: actionlog_core::Error) -> Self {
        use actionlog_core::Error as CoreError;
        match e {
            CoreError::InvalidConfig(msg) => Error::InvalidConfig(msg),
            CoreError::Serialization(e) => Error::Serialization(e.to_string()),
        }
    }
}

// Convert from storage errors
impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Io(io_err) => Error::Io(io_err),
            StorageError::InvalidKey(key) => Error::InvalidKey(key),
            StorageError::Backend(msg) => Error::Storage(msg),
            StorageError::Core(core) => core.into(),
        }
    }
}
