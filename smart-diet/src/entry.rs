//! Stored cache entry envelope.
//!
//! Values live in the key-value store as the JSON string
//! `{ "data": <payload>, "timestamp": <epoch ms> }`. The payload is an
//! opaque suggestion response; nothing in this crate inspects it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cached suggestion response plus its write-time clock reading.
///
/// `timestamp` is always the clock at write time, never backdated; reads
/// never touch it. An entry is replaced wholesale by the next successful
/// fetch for the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached suggestion payload, passed through unchanged.
    pub data: Value,
    /// Milliseconds since epoch at write time.
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(data: Value, timestamp: i64) -> Self {
        Self { data, timestamp }
    }

    /// Entry age at `now_ms`, clamped to zero under clock skew.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.timestamp).max(0)
    }

    /// Serialize to the stored JSON string form.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored JSON string. Errors here mean the stored value is
    /// corrupt; callers treat that as a cache miss.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
