//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with age-ordered eviction,
//! a byte budget, and TTL expiration.
//!
//! The store works on already-built fingerprint keys and is not thread-safe on
//! its own; `CacheManager` wraps it in a lock. Every time-dependent operation
//! has an `_at` variant taking the current Unix time in milliseconds.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{AgeIndex, ByteBudget, CacheEntry, CacheStats, DEFAULT_MAX_SIZE, DEFAULT_TTL};

// == Cache Config ==
/// Construction parameters for a cache store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Byte budget for the sum of entry sizes
    pub max_size: usize,
    /// TTL applied when `insert` is given no override
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            default_ttl: DEFAULT_TTL,
        }
    }
}

// == Cache Store ==
/// Main cache storage with byte-budget eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Creation-time ordering for eviction
    ages: AgeIndex,
    /// Performance statistics (hit/miss/eviction counters only)
    stats: CacheStats,
    /// Sum of `size_bytes` over all entries
    total_size: usize,
    budget: ByteBudget,
    default_ttl: Duration,
    next_seq: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given budget and default TTL.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            ages: AgeIndex::new(),
            stats: CacheStats::new(),
            total_size: 0,
            budget: ByteBudget::new(config.max_size),
            default_ttl: config.default_ttl,
            next_seq: 0,
        }
    }

    // == Insert ==
    /// Stores a value under `key`, replacing any previous entry.
    ///
    /// The entry expires after `ttl`, or the store's default TTL if None.
    /// Returns the number of entries evicted to bring the store back under budget.
    pub fn insert(&mut self, key: String, value: Value, ttl: Option<Duration>) -> usize {
        self.insert_at(key, value, ttl, current_timestamp_ms())
    }

    pub fn insert_at(&mut self, key: String, value: Value, ttl: Option<Duration>, now: u64) -> usize {
        self.detach(&key);

        let mut entry = CacheEntry::new(key.clone(), value, ttl.unwrap_or(self.default_ttl), now);
        entry.seq = self.next_seq;
        self.next_seq += 1;

        self.ages.insert(entry.created_at, entry.seq, &key);
        self.total_size += entry.size_bytes;
        self.entries.insert(key, entry);

        self.enforce_budget()
    }

    // == Lookup ==
    /// Retrieves a value by key, counting a hit or a miss.
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn lookup(&mut self, key: &str) -> Option<Value> {
        self.lookup_at(key, current_timestamp_ms())
    }

    pub fn lookup_at(&mut self, key: &str, now: u64) -> Option<Value> {
        self.lookup_where_at(key, now, |_| true)
    }

    /// Like `lookup`, but a live value rejected by `accept` counts as a miss.
    ///
    /// The rejected entry stays in place.
    pub fn lookup_where<F>(&mut self, key: &str, accept: F) -> Option<Value>
    where
        F: FnOnce(&Value) -> bool,
    {
        self.lookup_where_at(key, current_timestamp_ms(), accept)
    }

    pub fn lookup_where_at<F>(&mut self, key: &str, now: u64, accept: F) -> Option<Value>
    where
        F: FnOnce(&Value) -> bool,
    {
        let (expired, accepted) = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) if entry.is_expired_at(now) => (true, false),
            Some(entry) => (false, accept(&entry.value)),
        };

        if expired {
            self.detach(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        if !accepted {
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Contains ==
    /// Reports whether a live entry exists for `key`.
    ///
    /// Does not touch statistics and leaves expired entries for the sweep.
    pub fn contains(&self, key: &str) -> bool {
        self.contains_at(key, current_timestamp_ms())
    }

    pub fn contains_at(&self, key: &str, now: u64) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired_at(now))
            .unwrap_or(false)
    }

    // == Remove ==
    /// Removes an entry by key, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.detach(key).is_some()
    }

    // == Clear ==
    /// Drops every entry and resets all counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.ages.clear();
        self.total_size = 0;
        self.stats = CacheStats::new();
    }

    // == Stats ==
    /// Returns current cache statistics.
    ///
    /// `total_items` and `total_size` cover live entries only; expired entries
    /// waiting for the sweep are left out.
    pub fn stats(&self) -> CacheStats {
        self.stats_at(current_timestamp_ms())
    }

    pub fn stats_at(&self, now: u64) -> CacheStats {
        let mut stats = self.stats.clone();
        for entry in self.entries.values().filter(|entry| !entry.is_expired_at(now)) {
            stats.total_items += 1;
            stats.total_size += entry.size_bytes;
        }
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(current_timestamp_ms())
    }

    pub fn cleanup_expired_at(&mut self, now: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.detach(&key);
        }

        self.stats.record_expirations(count);
        count
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sum of the estimated sizes of all entries, expired or not.
    ///
    /// This is the figure the byte budget is enforced against.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn budget(&self) -> ByteBudget {
        self.budget
    }

    /// Returns the entry stored under `key` without any expiry check.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // Removes an entry from the map, the age index and the size total.
    fn detach(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.ages.remove(entry.created_at, entry.seq);
        self.total_size -= entry.size_bytes;
        Some(entry)
    }

    // Evicts oldest entries until the total is at or below the low-water mark.
    fn enforce_budget(&mut self) -> usize {
        if !self.budget.is_exceeded(self.total_size) {
            return 0;
        }

        let mut evicted = 0;
        while self.budget.above_low_water(self.total_size) {
            let Some(key) = self.ages.pop_oldest() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&key) {
                self.total_size -= entry.size_bytes;
                self.stats.record_eviction();
                evicted += 1;
            }
        }

        debug!(
            evicted,
            total_size = self.total_size,
            max_size = self.budget.max_size(),
            "Byte budget exceeded, evicted oldest entries"
        );
        evicted
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
