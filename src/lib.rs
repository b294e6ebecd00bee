//! # actionlog
//!
//! Bounded, persisted log of user actions for client-side analytics.
//!
//! Actions are appended to a single log stored under one key of a key-value
//! store. The log keeps at most `hard_item_limit` entries, heals itself when
//! the stored value is corrupted, runs registered callbacks when an action is
//! recorded, and offers pattern queries for reporting.
//!
//! ## Quick Start
//!
//! ```ignore
//! use actionlog::prelude::*;
//!
//! let log = ActionLog::open("./telemetry")?;
//!
//! log.on_log("SIGNUP_CALLBACK", "funnel", |log, _entries| {
//!     let funnels = log.find_subset_in_order(&Needlestack::from([(
//!         "signup".to_string(),
//!         vec!["LOGIN_OPEN".to_string(), "SIGNUP_CALLBACK".to_string()],
//!     )]));
//!     println!("{:?}", funnels);
//!     Ok(())
//! });
//!
//! log.log_action("LOGIN_OPEN", None);
//! log.log_action("SIGNUP_CALLBACK", None);
//! ```
//!
//! ## Operations
//!
//! - [`ActionLog::log_action`] - record an action and run its callbacks
//! - [`ActionLog::on_log`] - register a callback for an action
//! - [`ActionLog::find_subset_in_order`] - ordered subsequence search
//! - [`ActionLog::events_since_last_occurrence_of`] - tail since an action
//! - [`ActionLog::find_latest_occurrence`] - most recent entry for an action
//! - [`ActionLog::log_history_and_mark`] - report unflushed entries
//!
//! ## Concurrency
//!
//! All operations are synchronous. Each read-modify-write of the log holds a
//! store-wide re-entrant lock, so threads sharing one `ActionLog` see whole
//! writes. A callback that records an action while another record call is
//! dispatching runs its own complete write; the outer write has already
//! committed by then.

#![warn(missing_docs)]

mod action_log;
mod callbacks;
mod error;
mod history;
mod query;
mod recorder;
mod types;

pub mod prelude;

// Re-export main entry points
pub use action_log::{ActionLog, ActionLogBuilder};
pub use callbacks::{Callback, CallbackRegistry};
pub use error::{Error, Result};
pub use history::{partition_unmarked, FlushOutcome, FlushSink};
pub use query::{
    events_since_last_occurrence_of, find_latest_occurrence, find_subset_in_order,
    prepend_to_result_sets, Matches, Needlestack,
};

// Re-export types
pub use types::*;
