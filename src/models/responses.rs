//! Response DTOs for the panel cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{format_bytes, CacheStats};

/// Response body for GET /api/performance-stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStatsResponse {
    /// Current number of entries in cache
    pub total_items: usize,
    /// Sum of estimated entry sizes in bytes
    pub total_size: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// misses / (hits + misses)
    pub miss_rate: f64,
    pub hits: u64,
    pub misses: u64,
    /// `total_size` rendered for humans
    pub size_readable: String,
}

impl From<CacheStats> for PerformanceStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total_items: stats.total_items,
            total_size: stats.total_size,
            hit_rate: stats.hit_rate(),
            miss_rate: stats.miss_rate(),
            hits: stats.hits,
            misses: stats.misses,
            size_readable: format_bytes(stats.total_size),
        }
    }
}

/// Response body for DELETE /api/performance-stats
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            success: true,
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for POST /api/cache/check
#[derive(Debug, Clone, Serialize)]
pub struct KeyCheckResponse {
    /// The fingerprint key built from the request
    pub key: String,
    /// Whether a live entry exists under that key
    pub cached: bool,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
