//! Public types for actionlog.
//!
//! This module re-exports types from the internal crates with a clean public
//! interface.

// Log model
pub use actionlog_core::{now_millis, Log, LogEntry, Payload};

// Configuration
pub use actionlog_core::LogConfig;

// Decoding of stored logs
pub use actionlog_core::Decoded;

// Storage
pub use actionlog_storage::{FileStorage, LogStore, MemoryStorage, StorageAdapter, StorageError, SyncMode};
