//! Cache Module
//!
//! Bounded in-memory cache keyed by request fingerprints, with TTL expiration
//! and oldest-first eviction under a byte budget.

mod entry;
mod eviction;
mod helpers;
mod key;
mod manager;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use entry::{current_timestamp_ms, estimate_size, CacheEntry};
pub use eviction::{AgeIndex, ByteBudget, LOW_WATER_RATIO};
pub use helpers::{
    CHARACTER_REF_PREFIX, CHARACTER_REF_TTL, PANEL_IMAGE_PREFIX, PANEL_IMAGE_TTL,
    STORY_ANALYSIS_PREFIX, STORY_ANALYSIS_TTL, STORY_BREAKDOWN_PREFIX, STORY_BREAKDOWN_TTL,
};
pub use key::{build_key, FIELD_SEPARATOR};
pub use manager::CacheManager;
pub use stats::{format_bytes, CacheStats};
pub use store::{CacheConfig, CacheStore};

// == Public Constants ==
/// Default byte budget (50 MiB)
pub const DEFAULT_MAX_SIZE: usize = 50 * 1024 * 1024;

/// Default TTL for entries stored without an override
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default period of the background TTL sweep
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);
