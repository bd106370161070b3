//! Request DTOs for the panel cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for the fingerprint check (POST /api/cache/check)
///
/// # Fields
/// - `prefix`: The domain prefix, e.g. `panel_image`
/// - `params`: The parameter object the key is built from
#[derive(Debug, Clone, Deserialize)]
pub struct KeyCheckRequest {
    pub prefix: String,
    #[serde(default)]
    pub params: Value,
}

impl KeyCheckRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.prefix.is_empty() {
            return Some("Prefix cannot be empty".to_string());
        }
        if !(self.params.is_object() || self.params.is_null()) {
            return Some("Params must be a JSON object".to_string());
        }
        None
    }
}
