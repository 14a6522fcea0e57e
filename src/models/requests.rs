//! Request DTOs for the store server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::{Deserialize, Serialize};

use crate::method::WILDCARD;

/// Maximum key length accepted by PUT /set, in bytes
pub const MAX_KEY_LENGTH: usize = 1024;

/// Maximum value size accepted by PUT /set, in bytes
pub const MAX_VALUE_SIZE: usize = 8 * 1024 * 1024;

/// Request body limit: worst-case JSON escaping (`\uXXXX`) of a maximal key
/// and value, plus envelope.
pub const MAX_BODY_SIZE: usize = 6 * (MAX_KEY_LENGTH + MAX_VALUE_SIZE) + 1024;

/// Request body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRequest {
    /// The key
    pub key: String,
    /// The value to store, usually JSON text
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if self.value.len() > MAX_VALUE_SIZE {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            ));
        }
        if self.ttl == Some(0) {
            return Some("TTL must be at least one second".to_string());
        }
        None
    }
}

/// Query string for GET /keys
#[derive(Debug, Clone, Deserialize)]
pub struct KeysQuery {
    /// Glob pattern, every key when omitted
    #[serde(default = "match_all")]
    pub pattern: String,
}

fn match_all() -> String {
    WILDCARD.to_string()
}
