//! Log entry types
//!
//! A [`LogEntry`] is one recorded action. Entries are immutable once created,
//! except for the mark flag set when the entry is included in a history flush.

use serde::{Deserialize, Deserializer, Serialize};

/// Free-form payload attached to an action.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The ordered log. Insertion order is chronological order.
pub type Log = Vec<LogEntry>;

/// Mark value written for entries included in a flush
pub const MARKED: u32 = 1;

/// A single recorded action
///
/// Serializes as `{"timestamp": .., "id": .., "optional": {..}}` with a
/// `marked` field only once the entry has been flushed. Older logs that used
/// the short key `x` for the mark decode the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Action identifier. Entries persisted without one decode as `""`.
    #[serde(default)]
    pub id: String,
    /// Caller-supplied payload, `{}` when none was given
    #[serde(default, deserialize_with = "null_as_empty")]
    pub optional: Payload,
    /// Set once the entry has been reported by a history flush
    #[serde(default, alias = "x", skip_serializing_if = "Option::is_none")]
    pub marked: Option<u32>,
}

impl LogEntry {
    /// Create an unmarked entry stamped with the current time
    pub fn new(id: impl Into<String>, optional: Option<Payload>) -> Self {
        Self::at(now_millis(), id, optional)
    }

    /// Create an unmarked entry with an explicit timestamp
    pub fn at(timestamp: i64, id: impl Into<String>, optional: Option<Payload>) -> Self {
        Self {
            timestamp,
            id: id.into(),
            optional: optional.unwrap_or_default(),
            marked: None,
        }
    }

    /// Whether the entry has already been flushed
    #[inline]
    pub fn is_marked(&self) -> bool {
        self.marked.is_some()
    }

    /// Copy of this entry carrying the flush mark
    pub fn to_marked(&self) -> Self {
        Self {
            marked: Some(MARKED),
            ..self.clone()
        }
    }
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Payload, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Payload>::deserialize(deserializer)?.unwrap_or_default())
}
