//! Shared Store Module
//!
//! Cloneable async handle over a [`MemoryStore`], used by the HTTP handlers,
//! the cleanup task and as a [`KeyValueStore`] backend for the method cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::MemoryStore;
use crate::error::{CacheError, Result};
use crate::method::KeyValueStore;

// == Shared Store ==
/// Thread-safe handle to a single in-memory store.
///
/// Clones share the same underlying entries.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<MemoryStore>>,
}

impl SharedStore {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a store sized by the server configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(MemoryStore::new(
            config.max_entries,
            Duration::from_secs(config.default_ttl),
        ))
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, MemoryStore> {
        self.inner.read().await
    }

    /// Write access is also needed for lookups, which update LRU order and stats.
    pub async fn write(&self) -> RwLockWriteGuard<'_, MemoryStore> {
        self.inner.write().await
    }
}

#[async_trait]
impl KeyValueStore for SharedStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.write().await.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(CacheError::NotFound(_)) | Err(CacheError::Expired(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.write().await.set(key.to_string(), value, Some(ttl))
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        Ok(self.write().await.delete_many(keys) as u64)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self.read().await.keys(pattern))
    }
}
