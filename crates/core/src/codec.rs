//! Text encoding of a whole log
//!
//! The persisted value is a JSON array of entries. Decoding is an explicit
//! validation step: anything that is not an array of well-shaped entries is
//! reported as [`Decoded::Corrupted`] so the store can reset it, rather than
//! surfacing as an error.

use crate::entry::{Log, LogEntry};
use crate::error::Result;
use serde_json::Value;

/// Outcome of decoding a raw persisted value
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A well-formed log
    Valid(Log),
    /// Nothing was stored under the key
    Absent,
    /// Something was stored but it is not a log
    Corrupted(String),
}

impl Decoded {
    /// Whether the persisted value needs to be reset
    pub fn needs_reset(&self) -> bool {
        !matches!(self, Decoded::Valid(_))
    }

    /// The decoded log, or an empty one if nothing usable was stored
    pub fn into_log(self) -> Log {
        match self {
            Decoded::Valid(log) => log,
            Decoded::Absent | Decoded::Corrupted(_) => Log::new(),
        }
    }
}

/// Encode a log as text
pub fn encode(log: &[LogEntry]) -> Result<String> {
    Ok(serde_json::to_string(log)?)
}

/// Decode a raw persisted value
pub fn decode(raw: Option<&str>) -> Decoded {
    let Some(raw) = raw else {
        return Decoded::Absent;
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return Decoded::Corrupted(format!("unparseable: {}", e)),
    };

    if !value.is_array() {
        return Decoded::Corrupted(format!("expected array, found {}", kind_of(&value)));
    }

    match serde_json::from_value::<Log>(value) {
        Ok(log) => Decoded::Valid(log),
        Err(e) => Decoded::Corrupted(format!("malformed entry: {}", e)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
