//! Store contract required by the method cache.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// The four key-value primitives the method cache relies on.
///
/// Any store offering TTL-bound writes and glob key enumeration (Redis,
/// the bundled [`SharedStore`](crate::cache::SharedStore), ...) can back a
/// [`MethodCache`](crate::method::MethodCache). Client failures should be
/// reported as [`CacheError::Store`](crate::error::CacheError::Store).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored text, or None if the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Deletes the given keys, returning how many existed.
    async fn delete(&self, keys: &[String]) -> Result<u64>;

    /// Lists keys matching a glob pattern.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;
}

/// Whole seconds for stores whose expiry has second resolution, rounded up
/// and never zero.
#[cfg_attr(not(any(feature = "redis", feature = "http-store")), allow(dead_code))]
pub(crate) fn ttl_secs(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}
