//! Response envelope normalization.
//!
//! The backend is inconsistent about list shapes: some endpoints return
//! `{"items": [...]}`, some `{"data": [...]}`, some a bare array. Every
//! list read goes through [`record_values`] so callers see one shape.

use serde_json::Value;

/// Extracts the list payload from a response body.
///
/// Lookup order: an `items` array, then a `data` array, then the body
/// itself when it is an array. Anything else yields an empty list, and a
/// present `items`/`data` that is not an array falls through too.
#[must_use]
pub fn record_values(body: Value) -> Vec<Value> {
    match body {
        Value::Array(values) => values,
        Value::Object(mut map) => {
            for key in ["items", "data"] {
                if let Some(Value::Array(values)) = map.remove(key) {
                    return values;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}
