//! Error types for the method cache and its bundled store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the method cache and the in-memory store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No key-value store is bound to the method cache
    #[error("Method cache has no store configured")]
    NotConfigured,

    /// Unrecognized action suffix or missing underlying method
    #[error("Method {class}->{method} does not exist")]
    NoSuchMethod { class: String, method: String },

    /// The underlying method failed
    #[error("Method invocation failed: {0}")]
    Invocation(#[source] anyhow::Error),

    /// Arguments or result could not be JSON-encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by an external store client
    #[error("Store error: {0}")]
    Store(#[source] anyhow::Error),

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key has expired
    #[error("Key expired: {0}")]
    Expired(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    pub(crate) fn no_such_method(class: &str, method: &str) -> Self {
        CacheError::NoSuchMethod {
            class: class.to_string(),
            method: method.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) | CacheError::Expired(_) => StatusCode::NOT_FOUND,
            CacheError::NoSuchMethod { .. } => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::CacheFull(_) | CacheError::NotConfigured => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            CacheError::Invocation(_)
            | CacheError::Serialization(_)
            | CacheError::Store(_)
            | CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
