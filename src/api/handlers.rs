//! API Handlers
//!
//! HTTP request handlers exposing the in-memory store. `HttpStore` clients
//! read and write method cache entries through them.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{MemoryStore, SharedStore};
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, KeysQuery, KeysResponse, SetRequest,
    SetResponse, StatsResponse, TtlResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared handle to the store
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: SharedStore::new(store),
        }
    }

    /// Creates a new AppState sized by the server configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            store: SharedStore::from_config(config),
        }
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair, with the default TTL when none is given.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.map(Duration::from_secs);
    state.store.write().await.set(req.key.clone(), req.value, ttl)?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: lookups update LRU order and stats
    let value = state.store.write().await.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.store.write().await.delete(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /keys?pattern=<glob>
pub async fn keys_handler(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Json<KeysResponse> {
    let keys = state.store.read().await.keys(&query.pattern);

    Json(KeysResponse::new(query.pattern, keys))
}

/// Handler for GET /ttl/:key
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TtlResponse>> {
    let remaining = state.store.read().await.ttl(&key)?;

    Ok(Json(TtlResponse::new(key, remaining)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.store.read().await.stats();

    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
