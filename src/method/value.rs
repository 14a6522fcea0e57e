//! Decoding cached text and classifying results for TTL selection.

use serde_json::Value;

/// Decodes a stored entry.
///
/// Text that is not a JSON document (for example a plain string written by
/// another client) is returned as a JSON string holding the raw text.
pub fn decode_cached(raw: String) -> Value {
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(_) => Value::String(raw),
    }
}

/// Whether a result counts as empty and gets the short TTL.
///
/// Empty: `null`, `false`, numeric zero (including `0.0` and `-0.0`), `""`,
/// `[]` and `{}`. The string `"0"` is not empty.
pub fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
