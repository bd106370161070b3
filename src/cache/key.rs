//! Fingerprint Key Module
//!
//! Builds deterministic cache keys from a prefix and a parameter object.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CacheError, Result};

/// Separator placed between rendered `name:value` pairs.
pub const FIELD_SEPARATOR: &str = "|";

// == Build Key ==
/// Builds a fingerprint key of the form `prefix:a:<json>|b:<json>|...`.
///
/// Field names are sorted lexicographically, so two parameter sets with the same
/// content always produce the same key no matter how they were assembled.
/// Empty parameters yield `prefix:`.
///
/// # Errors
/// - `CacheError::Serialization` if `params` cannot be serialized
/// - `CacheError::InvalidParams` if `params` does not serialize to a JSON object
pub fn build_key<P: Serialize + ?Sized>(prefix: &str, params: &P) -> Result<String> {
    let fields = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        other => {
            return Err(CacheError::InvalidParams(format!(
                "expected an object, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut names: Vec<&String> = fields.keys().collect();
    names.sort();

    let mut rendered = Vec::with_capacity(names.len());
    for name in names {
        let value = serde_json::to_string(&fields[name.as_str()])?;
        rendered.push(format!("{}:{}", name, value));
    }

    Ok(format!("{}:{}", prefix, rendered.join(FIELD_SEPARATOR)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
