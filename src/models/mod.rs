//! Request and Response models for the panel cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::KeyCheckRequest;
pub use responses::{ClearResponse, HealthResponse, KeyCheckResponse, PerformanceStatsResponse};
