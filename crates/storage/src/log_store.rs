//! The log store
//!
//! Reads and writes the whole log as one value under a single key.
//!
//! ## Self-healing
//!
//! A missing, unparseable or non-array value is treated as corruption: the
//! stored value is reset to an empty log and an empty log is returned.
//! Loading never fails.
//!
//! ## Transactions
//!
//! Every read-modify-write runs inside a [`Transaction`], which holds a
//! store-wide re-entrant lock. Threads see whole transactions. The same
//! thread may open a nested transaction (a callback that logs while another
//! log call is dispatching); the nested write is not isolated from the outer
//! one, and whichever saves last wins.
//!
//! ## Detached stores
//!
//! A store without a backend turns every operation into a no-op and reads an
//! empty log.

use crate::adapter::StorageAdapter;
use crate::error::Result;
use actionlog_core::codec::{self, Decoded};
use actionlog_core::{Log, LogEntry};
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

const EMPTY_LOG: &str = "[]";

/// Persists the log under one key of a [`StorageAdapter`]
pub struct LogStore {
    backend: Option<Arc<dyn StorageAdapter>>,
    key: String,
    txn_lock: ReentrantMutex<()>,
}

impl LogStore {
    /// Create a store over `backend`, keeping the log under `key`
    pub fn new(backend: Arc<dyn StorageAdapter>, key: impl Into<String>) -> Self {
        Self {
            backend: Some(backend),
            key: key.into(),
            txn_lock: ReentrantMutex::new(()),
        }
    }

    /// Create a store with no backend
    pub fn detached(key: impl Into<String>) -> Self {
        Self {
            backend: None,
            key: key.into(),
            txn_lock: ReentrantMutex::new(()),
        }
    }

    /// Check if a backend is attached
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Key the log is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Begin a transaction
    ///
    /// Returns `None` for a detached store.
    pub fn transaction(&self) -> Option<Transaction<'_>> {
        let backend = self.backend.as_deref()?;
        Some(Transaction {
            store: self,
            backend,
            _guard: self.txn_lock.lock(),
        })
    }

    /// Load the current log
    pub fn load(&self) -> Log {
        self.transaction().map(|txn| txn.load()).unwrap_or_default()
    }

    /// Replace the stored log
    pub fn save(&self, log: &[LogEntry]) -> Result<()> {
        match self.transaction() {
            Some(txn) => txn.save(log),
            None => Ok(()),
        }
    }

    /// Scoped read-modify-write
    ///
    /// `f` receives the current log. If it returns a replacement, that
    /// replacement is persisted; `None` leaves storage untouched. On a
    /// detached store `f` is not called.
    pub fn with_log<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(Log) -> Option<Log>,
    {
        let Some(txn) = self.transaction() else {
            return Ok(());
        };
        match f(txn.load()) {
            Some(replacement) => txn.save(&replacement),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for LogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStore")
            .field("key", &self.key)
            .field("available", &self.is_available())
            .finish()
    }
}

/// A read-modify-write scope over a [`LogStore`]
///
/// Holds the store lock until dropped.
pub struct Transaction<'a> {
    store: &'a LogStore,
    backend: &'a dyn StorageAdapter,
    _guard: ReentrantMutexGuard<'a, ()>,
}

impl Transaction<'_> {
    /// Load the log, resetting the stored value if it is absent or corrupted
    pub fn load(&self) -> Log {
        let key = self.store.key.as_str();
        let raw = match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Reading log {} failed, using empty log: {}", key, e);
                return Log::new();
            }
        };

        let decoded = codec::decode(raw.as_deref());
        match &decoded {
            Decoded::Valid(_) => {}
            Decoded::Absent => debug!("No log stored under {}, initializing", key),
            Decoded::Corrupted(reason) => {
                warn!("Log {} is corrupted ({}), resetting to empty", key, reason)
            }
        }

        if decoded.needs_reset() {
            if let Err(e) = self.backend.set(key, EMPTY_LOG) {
                warn!("Resetting log {} failed: {}", key, e);
            }
        }
        decoded.into_log()
    }

    /// Persist `log` as the whole stored log
    pub fn save(&self, log: &[LogEntry]) -> Result<()> {
        let text = codec::encode(log)?;
        self.backend.set(&self.store.key, &text)
    }
}
