//! Eviction Module
//!
//! Oldest-first ordering of cache keys and the byte budget that drives eviction.

use std::collections::BTreeMap;

/// Fraction of `max_size` that eviction drains down to once the budget is exceeded.
pub const LOW_WATER_RATIO: f64 = 0.8;

// == Age Index ==
/// Orders keys by creation time so the oldest entry can be found cheaply.
///
/// Entries are indexed by `(created_at, seq)`; `seq` is a per-store insertion
/// counter, so entries created in the same millisecond evict in insertion order.
#[derive(Debug, Default)]
pub struct AgeIndex {
    order: BTreeMap<(u64, u64), String>,
}

impl AgeIndex {
    // == Constructor ==
    /// Creates a new empty age index.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
        }
    }

    // == Insert ==
    /// Records a key under its creation time and sequence number.
    pub fn insert(&mut self, created_at: u64, seq: u64, key: &str) {
        self.order.insert((created_at, seq), key.to_string());
    }

    // == Remove ==
    /// Forgets the key recorded at `(created_at, seq)`.
    pub fn remove(&mut self, created_at: u64, seq: u64) {
        self.order.remove(&(created_at, seq));
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest key, or None if the index is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}

// == Byte Budget ==
/// Upper bound on the total estimated size of cached values.
///
/// Crossing `max_size` triggers eviction down to the low-water mark so the
/// next few inserts do not each evict again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteBudget {
    max_size: usize,
    low_water: usize,
}

impl ByteBudget {
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            low_water: (max_size as f64 * LOW_WATER_RATIO) as usize,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn low_water(&self) -> usize {
        self.low_water
    }

    /// True when `total` bytes exceeds the budget.
    pub fn is_exceeded(&self, total: usize) -> bool {
        total > self.max_size
    }

    /// True while eviction still has to continue at `total` bytes.
    pub fn above_low_water(&self, total: usize) -> bool {
        total > self.low_water
    }
}
