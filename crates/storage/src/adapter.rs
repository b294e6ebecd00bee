//! The key-value string store boundary
//!
//! The log lives as one text value under one well-known key. Adapters only
//! need to get and set whole values.

use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;

/// A key-value string store
///
/// Implementations must be usable from any thread. `get` returns `Ok(None)`
/// when nothing is stored under the key.
pub trait StorageAdapter: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process storage backed by a map
///
/// Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
