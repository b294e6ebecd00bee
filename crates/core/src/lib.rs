//! Core types for actionlog
//!
//! This crate defines the data model shared by the storage layer and the
//! facade:
//! - [`LogEntry`]: one recorded action
//! - [`Log`]: the ordered sequence of entries
//! - [`LogConfig`]: retention and flush thresholds
//! - [`codec`]: text encoding of a whole log, with explicit corruption detection

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod entry;
pub mod error;

pub use codec::Decoded;
pub use config::LogConfig;
pub use entry::{now_millis, Log, LogEntry, Payload};
pub use error::{Error, Result};
