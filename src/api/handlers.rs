//! API Handlers
//!
//! HTTP request handlers exposing the cache's aggregate state.

use axum::{extract::State, Json};

use crate::cache::{build_key, CacheConfig, CacheManager};
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, HealthResponse, KeyCheckRequest, KeyCheckResponse, PerformanceStatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds a clone of the process-wide `CacheManager`.
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheManager,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(CacheManager::new(config.cache_config()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CacheManager::new(CacheConfig::default()))
    }
}

/// Handler for GET /api/performance-stats
///
/// Returns current cache statistics.
pub async fn performance_stats_handler(
    State(state): State<AppState>,
) -> Json<PerformanceStatsResponse> {
    let stats = state.cache.stats().await;
    Json(PerformanceStatsResponse::from(stats))
}

/// Handler for DELETE /api/performance-stats
///
/// Clears every entry and resets the counters.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear().await;
    Json(ClearResponse::cleared())
}

/// Handler for POST /api/cache/check
///
/// Reports the fingerprint key for `(prefix, params)` and whether it is cached.
/// Does not count as a hit or a miss.
pub async fn key_check_handler(
    State(state): State<AppState>,
    Json(req): Json<KeyCheckRequest>,
) -> Result<Json<KeyCheckResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key = build_key(&req.prefix, &req.params)?;
    let cached = state.cache.has_key(&key).await;

    Ok(Json(KeyCheckResponse { key, cached }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
