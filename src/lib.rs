//! Method Cache - memoize method results in a key-value store
//!
//! Results are stored as JSON text under keys derived from class, method and
//! arguments, with a short TTL for empty results. Backends: an in-process
//! TTL/LRU store, a Redis client, and a client for the bundled store server
//! that lets several processes share one in-memory store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod method;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{MemoryStore, SharedStore};
#[cfg(feature = "http-store")]
pub use cache::HttpStore;
#[cfg(feature = "redis")]
pub use cache::RedisStore;
pub use config::{CacheConfig, Config};
pub use error::{CacheError, Result};
pub use method::{Action, CacheTarget, KeyValueStore, MethodCache, Outcome};
pub use tasks::spawn_cleanup_task;
