//! Redis-backed store
//!
//! Entries live in a Redis server, so every process pointing a
//! [`MethodCache`](crate::method::MethodCache) at the same server shares them.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::method::{ttl_secs, KeyValueStore};

/// [`KeyValueStore`] over a multiplexed Redis connection.
///
/// Clones share the connection. Expiry has second resolution; shorter TTLs
/// are rounded up to one second.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Connects to the server at `url` (e.g. `redis://127.0.0.1:6379/0`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(store_error)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(store_error)?;
        debug!("Connected to Redis store");
        Ok(Self { conn })
    }
}

fn store_error(err: redis::RedisError) -> CacheError {
    CacheError::Store(err.into())
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(store_error)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs(ttl))
            .await
            .map_err(store_error)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        // DEL without arguments is a protocol error
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        conn.del(keys).await.map_err(store_error)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        conn.keys(pattern).await.map_err(store_error)
    }
}
