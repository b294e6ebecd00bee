//! Log configuration
//!
//! Configuration is passed into each log instance at construction so that
//! instances stay independent of one another.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default maximum number of retained entries
pub const DEFAULT_HARD_ITEM_LIMIT: usize = 200;

/// Default number of new entries a history flush waits for
pub const DEFAULT_HISTORY_MIN_BUFFER: usize = 20;

/// Default storage key the whole log lives under
pub const DEFAULT_STORAGE_KEY: &str = "ACTION_LOG";

/// Retention and flush settings for one log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum number of entries kept. The oldest are evicted first.
    pub hard_item_limit: usize,
    /// A history flush happens only when strictly more new entries than this
    /// are pending, unless forced.
    pub history_min_buffer: usize,
    /// Key under which the serialized log is stored
    pub storage_key: String,
}

impl LogConfig {
    /// Check that the settings can be honored
    ///
    /// A hard item limit of zero cannot hold the entry being appended.
    pub fn validate(&self) -> Result<()> {
        if self.hard_item_limit == 0 {
            return Err(Error::InvalidConfig(
                "hard_item_limit must be at least 1".to_string(),
            ));
        }
        if self.storage_key.is_empty() {
            return Err(Error::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            hard_item_limit: DEFAULT_HARD_ITEM_LIMIT,
            history_min_buffer: DEFAULT_HISTORY_MIN_BUFFER,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
