//! Convenient imports for actionlog.
//!
//! ```ignore
//! use actionlog::prelude::*;
//!
//! let log = ActionLog::ephemeral();
//! log.log_action("LOGIN_OPEN", None);
//! ```

// Main entry point
pub use crate::action_log::{ActionLog, ActionLogBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Flushing
pub use crate::history::{FlushOutcome, FlushSink};

// Queries
pub use crate::query::{Matches, Needlestack};

// Core types
pub use crate::types::{Log, LogConfig, LogEntry, Payload, StorageAdapter};

// Re-export serde_json for building payloads
pub use serde_json::json;
