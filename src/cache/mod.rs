//! Cache Module
//!
//! Store backends for the method cache: the bundled in-memory store with TTL
//! expiration, LRU eviction and glob key enumeration, plus optional clients
//! for Redis (`redis` feature) and the store server (`http-store` feature).

mod entry;
mod glob;
#[cfg(feature = "http-store")]
mod http;
mod lru;
#[cfg(feature = "redis")]
mod redis;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use glob::glob_match;
#[cfg(feature = "http-store")]
pub use http::HttpStore;
pub use lru::LruTracker;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;
pub use shared::SharedStore;
pub use stats::CacheStats;
pub use store::MemoryStore;
