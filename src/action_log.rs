//! Main entry point for actionlog.
//!
//! This module provides the `ActionLog` struct, which owns the log store, the
//! callback registry and the flush sink, and `ActionLogBuilder` for
//! configuring one.

use crate::callbacks::CallbackRegistry;
use crate::error::Result;
use crate::history::FlushSink;
use actionlog_core::{Log, LogConfig, LogEntry};
use actionlog_storage::{FileStorage, LogStore, MemoryStorage, StorageAdapter, SyncMode};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// A bounded, persisted action log.
///
/// Create one with [`ActionLog::open`], [`ActionLog::ephemeral`] or
/// [`ActionLog::builder`].
///
/// # Example
///
/// ```ignore
/// use actionlog::prelude::*;
///
/// let log = ActionLog::builder()
///     .path("./telemetry")
///     .hard_item_limit(500)
///     .flush_sink(|entries: &[LogEntry]| {
///         println!("reporting {} entries", entries.len());
///         Ok(())
///     })
///     .build()?;
///
/// log.log_action("LOGIN_OPEN", None);
/// log.log_history_and_mark(false)?;
/// ```
pub struct ActionLog {
    pub(crate) store: LogStore,
    pub(crate) config: LogConfig,
    pub(crate) callbacks: CallbackRegistry,
    pub(crate) sink: Option<Arc<dyn FlushSink>>,
}

impl ActionLog {
    /// Open a log persisted in files under `dir`.
    ///
    /// Uses default settings.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(dir).build()
    }

    /// Create a log over fresh in-memory storage.
    ///
    /// Everything is lost when the log is dropped. Use this for tests.
    pub fn ephemeral() -> Self {
        Self::from_parts(
            LogStore::new(
                Arc::new(MemoryStorage::new()),
                LogConfig::default().storage_key,
            ),
            LogConfig::default(),
            None,
        )
    }

    /// Create a log with no storage backend.
    ///
    /// Every operation is a silent no-op and reads see an empty log.
    pub fn detached() -> Self {
        Self::from_parts(
            LogStore::detached(LogConfig::default().storage_key),
            LogConfig::default(),
            None,
        )
    }

    /// Create a builder for log configuration.
    pub fn builder() -> ActionLogBuilder {
        ActionLogBuilder::new()
    }

    fn from_parts(store: LogStore, config: LogConfig, sink: Option<Arc<dyn FlushSink>>) -> Self {
        Self {
            store,
            config,
            callbacks: CallbackRegistry::new(),
            sink,
        }
    }

    /// Settings in effect.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Check if a storage backend is attached.
    pub fn is_available(&self) -> bool {
        self.store.is_available()
    }

    /// Underlying log store.
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// The full current log, oldest entry first.
    ///
    /// Empty when no backend is attached or nothing has been recorded.
    pub fn get_logs(&self) -> Log {
        self.store.load()
    }

    /// Replace the whole stored log.
    ///
    /// The hard item limit is not applied here.
    pub fn set_logs(&self, log: &[LogEntry]) -> Result<()> {
        self.store.save(log).map_err(Into::into)
    }

    /// Scoped read-modify-write over the stored log.
    ///
    /// See [`LogStore::with_log`].
    pub fn with_log<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(Log) -> Option<Log>,
    {
        self.store.with_log(f).map_err(Into::into)
    }
}

impl fmt::Debug for ActionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionLog")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

enum Backend {
    Memory,
    Adapter(Arc<dyn StorageAdapter>),
    Path(PathBuf),
    Detached,
}

/// Builder for log configuration.
///
/// # Example
///
/// ```ignore
/// // Production: file-backed, fsync on every write
/// let log = ActionLog::builder()
///     .path("./telemetry")
///     .strict()
///     .build()?;
///
/// // Tests: in memory, small limits
/// let log = ActionLog::builder()
///     .hard_item_limit(4)
///     .history_min_buffer(2)
///     .build()?;
/// ```
pub struct ActionLogBuilder {
    config: LogConfig,
    backend: Backend,
    sync: SyncMode,
    sink: Option<Arc<dyn FlushSink>>,
}

impl ActionLogBuilder {
    /// Create a new builder with default settings and in-memory storage.
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
            backend: Backend::Memory,
            sync: SyncMode::default(),
            sink: None,
        }
    }

    /// Replace all settings at once.
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Maximum number of retained entries.
    pub fn hard_item_limit(mut self, limit: usize) -> Self {
        self.config.hard_item_limit = limit;
        self
    }

    /// Number of new entries a history flush must exceed.
    pub fn history_min_buffer(mut self, min: usize) -> Self {
        self.config.history_min_buffer = min;
        self
    }

    /// Key the log is stored under.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Store the log through a caller-supplied adapter.
    pub fn storage(mut self, adapter: Arc<dyn StorageAdapter>) -> Self {
        self.backend = Backend::Adapter(adapter);
        self
    }

    /// Store the log in files under `dir`.
    pub fn path(mut self, dir: impl AsRef<Path>) -> Self {
        self.backend = Backend::Path(dir.as_ref().to_path_buf());
        self
    }

    /// fsync every file write. Only affects [`path`](Self::path) storage.
    pub fn strict(mut self) -> Self {
        self.sync = SyncMode::Strict;
        self
    }

    /// Build without any storage backend.
    pub fn detached(mut self) -> Self {
        self.backend = Backend::Detached;
        self
    }

    /// Sink receiving entries reported by a history flush.
    pub fn flush_sink(mut self, sink: impl FlushSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Build the log.
    ///
    /// Fails if the settings are invalid or file storage cannot be opened.
    pub fn build(self) -> Result<ActionLog> {
        self.config.validate()?;
        let key = self.config.storage_key.clone();

        let store = match self.backend {
            Backend::Memory => LogStore::new(Arc::new(MemoryStorage::new()), key),
            Backend::Adapter(adapter) => LogStore::new(adapter, key),
            Backend::Path(dir) => {
                LogStore::new(Arc::new(FileStorage::open_with(dir, self.sync)?), key)
            }
            Backend::Detached => {
                warn!("Building action log without storage, all operations are no-ops");
                LogStore::detached(key)
            }
        };

        Ok(ActionLog::from_parts(store, self.config, self.sink))
    }
}

impl Default for ActionLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
