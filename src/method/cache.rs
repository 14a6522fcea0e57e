//! Method Cache
//!
//! Memoizes method results in a [`KeyValueStore`], either through the typed
//! API ([`MethodCache::cached`], [`MethodCache::clear`], [`MethodCache::flush`])
//! or by `<method><Action>` name through [`MethodCache::dispatch`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::method::key::{build_key, ArgumentDigest};
use crate::method::value::{decode_cached, is_empty_result};
use crate::method::{Action, CacheTarget, KeyValueStore, MethodCall};

// == Outcome ==
/// Result of a dispatched call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Cached or freshly computed method result
    Value(Value),
    /// Number of entries removed by a clear or flush
    Deleted(u64),
}

impl Outcome {
    pub fn into_value(self) -> Value {
        match self {
            Outcome::Value(value) => value,
            Outcome::Deleted(count) => Value::from(count),
        }
    }
}

// == Method Cache ==
/// Memoizes method results under keys derived from class, method and arguments.
///
/// The store handle is supplied by the caller and never opened or closed here.
/// Concurrent misses on the same key may each compute the result; the last
/// write wins.
pub struct MethodCache {
    store: Option<Arc<dyn KeyValueStore>>,
    config: CacheConfig,
}

impl MethodCache {
    /// Creates a cache with no store bound; every operation fails with
    /// [`CacheError::NotConfigured`] until [`bind`](Self::bind) is called.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: None,
            config,
        }
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>, config: CacheConfig) -> Self {
        Self {
            store: Some(store),
            config,
        }
    }

    pub fn bind(&mut self, store: Arc<dyn KeyValueStore>) {
        self.store = Some(store);
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Changes the TTL used for non-empty results written from now on.
    pub fn set_expire(&mut self, expire: Duration) {
        self.config.expire = expire;
    }

    // == Keys ==
    /// Key under which `class::method(args)` is cached.
    pub fn key<A: Serialize + ?Sized>(&self, class: &str, method: &str, args: &A) -> Result<String> {
        Ok(build_key(
            &self.config.prefix,
            class,
            method,
            &ArgumentDigest::of(args)?,
        ))
    }

    /// Glob matching every cached argument list of `class::method`.
    pub fn flush_pattern(&self, class: &str, method: &str) -> String {
        build_key(&self.config.prefix, class, method, &ArgumentDigest::Wildcard)
    }

    // == Dispatch ==
    /// Routes a `<method><Action>` call against `target`.
    ///
    /// # Errors
    /// - [`CacheError::NotConfigured`] if no store is bound
    /// - [`CacheError::NoSuchMethod`] if the name is too short, the suffix is not
    ///   `Cache`/`Clear`/`Flush`, or (on a cache miss) the target lacks the method
    pub async fn dispatch<T>(&self, target: &T, name: &str, args: &[Value]) -> Result<Outcome>
    where
        T: CacheTarget + ?Sized,
    {
        let store = self.store()?;
        let class = target.class_name();
        let call = MethodCall::parse(class, name)?;

        match call.action {
            Action::Cache => {
                let key = self.key(class, call.method, args)?;
                if let Some(hit) = self.lookup(store, &key).await? {
                    return Ok(Outcome::Value(hit));
                }

                if !target.has_method(call.method) {
                    return Err(CacheError::no_such_method(class, call.method));
                }

                let data = target
                    .call(call.method, args)
                    .await
                    .map_err(CacheError::Invocation)?;
                self.write_back(store, &key, &data).await?;
                Ok(Outcome::Value(data))
            }
            Action::Clear => self
                .clear(class, call.method, args)
                .await
                .map(Outcome::Deleted),
            Action::Flush => self.flush(class, call.method).await.map(Outcome::Deleted),
        }
    }

    // == Cached ==
    /// Returns the cached result of `class::method(args)`, running `compute`
    /// and storing its result on a miss.
    ///
    /// Empty results are stored with `empty_expire`, others with `expire`.
    pub async fn cached<A, T, F, Fut, E>(
        &self,
        class: &str,
        method: &str,
        args: &A,
        compute: F,
    ) -> Result<T>
    where
        A: Serialize + ?Sized,
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        let store = self.store()?;
        let key = self.key(class, method, args)?;

        if let Some(hit) = self.lookup(store, &key).await? {
            return Ok(serde_json::from_value(hit)?);
        }

        let data = compute()
            .await
            .map_err(|err| CacheError::Invocation(err.into()))?;
        self.write_back(store, &key, &serde_json::to_value(&data)?)
            .await?;
        Ok(data)
    }

    // == Clear ==
    /// Deletes the entry for exactly these arguments.
    pub async fn clear<A: Serialize + ?Sized>(
        &self,
        class: &str,
        method: &str,
        args: &A,
    ) -> Result<u64> {
        let store = self.store()?;
        let key = self.key(class, method, args)?;

        let deleted = store.delete(&[key.clone()]).await?;
        debug!("Method cache clear: {} ({} removed)", key, deleted);
        Ok(deleted)
    }

    // == Flush ==
    /// Deletes every cached argument list of `class::method`.
    pub async fn flush(&self, class: &str, method: &str) -> Result<u64> {
        let store = self.store()?;
        let pattern = self.flush_pattern(class, method);

        let keys = store.keys(&pattern).await?;
        let deleted = if keys.is_empty() {
            0
        } else {
            store.delete(&keys).await?
        };

        debug!("Method cache flush: {} ({} removed)", pattern, deleted);
        Ok(deleted)
    }

    fn store(&self) -> Result<&dyn KeyValueStore> {
        self.store.as_deref().ok_or(CacheError::NotConfigured)
    }

    fn ttl_for(&self, data: &Value) -> Duration {
        if is_empty_result(data) {
            self.config.empty_expire
        } else {
            self.config.expire
        }
    }

    async fn lookup(&self, store: &dyn KeyValueStore, key: &str) -> Result<Option<Value>> {
        match store.get(key).await? {
            Some(raw) => {
                debug!("Method cache hit: {}", key);
                Ok(Some(decode_cached(raw)))
            }
            None => {
                debug!("Method cache miss: {}", key);
                Ok(None)
            }
        }
    }

    async fn write_back(&self, store: &dyn KeyValueStore, key: &str, data: &Value) -> Result<()> {
        let ttl = self.ttl_for(data);
        store.set(key, data.to_string(), ttl).await?;
        debug!("Method cache store: {} (ttl {}s)", key, ttl.as_secs());
        Ok(())
    }
}
