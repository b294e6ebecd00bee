//! Recording actions.

use crate::action_log::ActionLog;
use actionlog_core::{LogEntry, Payload};
use serde_json::Value;
use tracing::{debug, warn};

impl ActionLog {
    /// Record an action.
    ///
    /// Appends `{timestamp: now, id, optional}` to the stored log, evicting the
    /// oldest entries so the log never exceeds the hard item limit, then runs
    /// the callbacks registered for `id` with the updated log.
    ///
    /// Never fails: a storage error is logged and the action is dropped, and
    /// on a detached log this does nothing.
    ///
    /// # Example
    ///
    /// ```ignore
    /// log.log_action("LOGIN_OPEN", None);
    ///
    /// let mut payload = Payload::new();
    /// payload.insert("action".into(), json!("signup"));
    /// log.log_action("LOGIN_SWITCH", Some(payload));
    /// ```
    pub fn log_action(&self, id: &str, optional: Option<Payload>) {
        let entry = LogEntry::new(id, optional);
        let keep = self.config.hard_item_limit.saturating_sub(1);

        let mut recorded = false;
        let result = self.store.with_log(|mut log| {
            if log.len() > keep {
                let evict = log.len() - keep;
                log.drain(..evict);
            }
            log.push(entry);
            recorded = true;
            Some(log)
        });

        match result {
            Ok(()) if recorded => self.callbacks.dispatch(self, id),
            Ok(()) => {}
            Err(e) => warn!("Dropping action {}: {}", id, e),
        }
    }

    /// Record an action whose ID comes from an untyped source.
    ///
    /// Anything other than a JSON string is ignored.
    pub fn log_raw_action(&self, id: &Value, optional: Option<Payload>) {
        match id.as_str() {
            Some(id) => self.log_action(id, optional),
            None => debug!("Ignoring action with non-string id {}", id),
        }
    }
}
