//! API Module
//!
//! HTTP handlers and routing for the cache's operational endpoints.
//!
//! # Endpoints
//! - `GET /api/performance-stats` - Cache statistics
//! - `DELETE /api/performance-stats` - Clear the cache
//! - `POST /api/cache/check` - Check whether a fingerprint is cached
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
