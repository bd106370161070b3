//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and size accounting.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The fingerprint key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Estimated footprint of `value`, used for budget eviction
    pub size_bytes: usize,
    /// Insertion sequence number, breaks ties between equal `created_at`
    pub(crate) seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry created at `now` that lives for `ttl`.
    pub fn new(key: String, value: Value, ttl: Duration, now: u64) -> Self {
        let size_bytes = estimate_size(&value);
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let expires_at = now.saturating_add(ttl_ms);

        Self {
            key,
            value,
            created_at: now,
            expires_at,
            size_bytes,
            seq: 0,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at the given time.
    ///
    /// An entry is expired once `now` reaches `expires_at`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

// == Size Estimation ==
/// Estimates the storage cost of a value.
///
/// Strings count two bytes per UTF-16 code unit. Anything else is measured
/// by its compact JSON rendering, also at two bytes per code unit.
pub fn estimate_size(value: &Value) -> usize {
    let units = match value {
        Value::String(s) => s.encode_utf16().count(),
        other => other.to_string().encode_utf16().count(),
    };
    units * 2
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
