//! Storage layer for actionlog
//!
//! This crate implements persistence of the whole log under one key:
//! - StorageAdapter: the key-value string store boundary
//! - MemoryStorage: in-process map, used for ephemeral logs and tests
//! - FileStorage: one file per key in a directory, atomic replace on write
//! - LogStore: load/save/with_log over an adapter, with corruption reset

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod error;
pub mod file;
pub mod log_store;

pub use adapter::{MemoryStorage, StorageAdapter};
pub use error::{Result, StorageError};
pub use file::{FileStorage, SyncMode};
pub use log_store::LogStore;
