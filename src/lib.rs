//! Panel Cache - request deduplication for AI story and panel generation
//!
//! Bounded in-memory TTL cache keyed by parameter fingerprints, with
//! oldest-first eviction under a byte budget and a periodic expiry sweep.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheConfig, CacheManager, CacheStats};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{spawn_sweep_task, SweeperHandle};
