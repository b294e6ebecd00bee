//! Reaction callbacks keyed by action ID.
//!
//! Several callbacks can listen to the same action; each is registered under
//! a callback ID that is unique for that action. Dispatch runs them in
//! registration order.

use crate::action_log::ActionLog;
use actionlog_core::LogEntry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// A callback invoked after an action is recorded.
///
/// Receives the log it was registered on and the full log as it stands after
/// the write.
pub type Callback = Arc<dyn Fn(&ActionLog, &[LogEntry]) -> anyhow::Result<()> + Send + Sync>;

/// Per-action callback registrations.
#[derive(Default)]
pub struct CallbackRegistry {
    // action id -> (callback id, callback), in registration order
    entries: RwLock<HashMap<String, Vec<(String, Callback)>>>,
}

impl CallbackRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `(action_id, callback_id)`.
    ///
    /// An existing registration with the same IDs is replaced and keeps its
    /// position in the dispatch order.
    pub fn register(&self, action_id: &str, callback_id: &str, callback: Callback) {
        let mut entries = self.entries.write();
        let slots = entries.entry(action_id.to_string()).or_default();
        match slots.iter_mut().find(|(id, _)| id == callback_id) {
            Some(slot) => slot.1 = callback,
            None => slots.push((callback_id.to_string(), callback)),
        }
    }

    /// Number of callbacks registered for `action_id`.
    pub fn count(&self, action_id: &str) -> usize {
        self.entries.read().get(action_id).map_or(0, Vec::len)
    }

    /// Check if no callback is registered at all.
    pub fn is_empty(&self) -> bool {
        self.entries.read().values().all(Vec::is_empty)
    }

    fn snapshot(&self, action_id: &str) -> Vec<(String, Callback)> {
        self.entries
            .read()
            .get(action_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Run every callback registered for `action_id`.
    ///
    /// The registry lock is released before any callback runs, so callbacks
    /// may register further callbacks or record actions. A callback that
    /// fails or panics is logged and skipped.
    pub(crate) fn dispatch(&self, owner: &ActionLog, action_id: &str) {
        let callbacks = self.snapshot(action_id);
        if callbacks.is_empty() {
            return;
        }

        let logs = owner.get_logs();
        for (callback_id, callback) in callbacks {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(owner, logs.as_slice()))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    "Callback {} for action {} failed: {:#}",
                    callback_id, action_id, e
                ),
                Err(_) => warn!("Callback {} for action {} panicked", callback_id, action_id),
            }
        }
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        let mut map = f.debug_map();
        for (action_id, slots) in entries.iter() {
            let ids: Vec<&str> = slots.iter().map(|(id, _)| id.as_str()).collect();
            map.entry(action_id, &ids);
        }
        map.finish()
    }
}

impl ActionLog {
    /// Register a callback run whenever `action_id` is recorded.
    ///
    /// Registering again with the same `callback_id` replaces the earlier
    /// callback. There is no unregister.
    ///
    /// # Example
    ///
    /// ```ignore
    /// log.on_log("SIGNUP_CALLBACK", "report", |_log, entries| {
    ///     println!("{} entries so far", entries.len());
    ///     Ok(())
    /// });
    /// ```
    pub fn on_log<F>(&self, action_id: &str, callback_id: &str, callback: F)
    where
        F: Fn(&ActionLog, &[LogEntry]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.callbacks
            .register(action_id, callback_id, Arc::new(callback));
    }

    /// Registered callbacks.
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }
}
