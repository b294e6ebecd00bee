//! Mark-and-flush history.
//!
//! Entries that have not yet been reported are handed to a [`FlushSink`] once
//! enough of them have accumulated, and are marked in storage so they are not
//! reported again.
//!
//! ## Ordering
//!
//! ```text
//! 1. Load the log and split off the unmarked entries
//! 2. IF pending <= history_min_buffer and not forced: stop, nothing written
//! 3. Persist the log with every pending entry marked (DURABILITY POINT)
//! 4. Hand exactly the newly marked entries to the sink
//! ```
//!
//! A sink failure after step 3 leaves the entries marked.

use crate::action_log::ActionLog;
use crate::error::{Error, Result};
use actionlog_core::{Log, LogEntry};
use tracing::{debug, info, warn};

/// Receiver of flushed history.
///
/// Implemented for any `Fn(&[LogEntry]) -> anyhow::Result<()>`.
pub trait FlushSink: Send + Sync {
    /// Report `entries`, oldest first.
    fn flush(&self, entries: &[LogEntry]) -> anyhow::Result<()>;
}

impl<F> FlushSink for F
where
    F: Fn(&[LogEntry]) -> anyhow::Result<()> + Send + Sync,
{
    fn flush(&self, entries: &[LogEntry]) -> anyhow::Result<()> {
        self(entries)
    }
}

/// Result of [`ActionLog::log_history_and_mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// This many entries were marked and handed to the sink
    Flushed {
        /// Entries reported
        count: usize,
    },
    /// Nothing was written; this many entries are still unreported
    Pending {
        /// Unmarked entries in the log
        count: usize,
    },
    /// No storage backend is attached
    Unavailable,
}

/// Split a log into its unmarked entries and a rewritten copy.
///
/// Returns `(history, copy)`: `history` holds every unmarked entry, now
/// marked, in log order; `copy` is the whole log with those entries marked
/// and already-marked entries unchanged.
pub fn partition_unmarked(log: &[LogEntry]) -> (Vec<LogEntry>, Log) {
    let mut history = Vec::new();
    let mut copy = Log::with_capacity(log.len());
    for entry in log {
        if entry.is_marked() {
            copy.push(entry.clone());
        } else {
            let marked = entry.to_marked();
            history.push(marked.clone());
            copy.push(marked);
        }
    }
    (history, copy)
}

impl ActionLog {
    /// Report and mark entries not yet flushed.
    ///
    /// Flushes when strictly more than `history_min_buffer` entries are
    /// unmarked, or when `force` is set. Otherwise nothing is written and the
    /// entries stay unmarked for the next call.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the marks could not be persisted (the sink
    /// is then not called), or [`Error::Sink`] if the sink failed after the
    /// marks were persisted.
    pub fn log_history_and_mark(&self, force: bool) -> Result<FlushOutcome> {
        let Some(txn) = self.store.transaction() else {
            return Ok(FlushOutcome::Unavailable);
        };

        let (history, copy) = partition_unmarked(&txn.load());
        let count = history.len();
        if count <= self.config.history_min_buffer && !force {
            debug!(
                "{} unreported entries, waiting for more than {}",
                count, self.config.history_min_buffer
            );
            return Ok(FlushOutcome::Pending { count });
        }

        let Some(sink) = self.sink.clone() else {
            warn!("{} entries ready to flush but no sink is configured", count);
            return Ok(FlushOutcome::Pending { count });
        };

        txn.save(&copy)?;
        drop(txn);

        info!("Flushing {} history entries", count);
        sink.flush(&history).map_err(Error::Sink)?;
        Ok(FlushOutcome::Flushed { count })
    }
}
