//! Error types for the panel cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the panel cache.
///
/// Misses and expired reads are not errors; only input that cannot be turned
/// into a fingerprint key ends up here.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Parameters or value could not be serialized to JSON
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Parameters serialized to something other than a JSON object
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Malformed HTTP request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Serialization(_)
            | CacheError::InvalidParams(_)
            | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the panel cache.
pub type Result<T> = std::result::Result<T, CacheError>;
