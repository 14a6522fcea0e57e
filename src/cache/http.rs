//! HTTP client store
//!
//! Talks to the store server (`PUT /set`, `GET /get/:key`, `DELETE /del/:key`,
//! `GET /keys`), so method caches in separate processes share one
//! in-memory store.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};

use crate::error::{CacheError, Result};
use crate::method::{ttl_secs, KeyValueStore};
use crate::models::{ErrorResponse, GetResponse, KeysResponse, SetRequest};

/// [`KeyValueStore`] backed by a remote store server.
///
/// TTLs are sent in whole seconds, rounded up.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base: Url,
}

impl HttpStore {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|err| CacheError::Store(err.into()))?;
        if base.cannot_be_a_base() {
            return Err(CacheError::Store(anyhow!("{} cannot be a base URL", base)));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CacheError::Store(anyhow!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn transport_error(err: reqwest::Error) -> CacheError {
    CacheError::Store(err.into())
}

/// Turns a non-success response into a store error carrying the server's message.
async fn rejected(response: Response) -> CacheError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    CacheError::Store(anyhow!("store server returned {}: {}", status, message))
}

#[async_trait]
impl KeyValueStore for HttpStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.url(&["get", key])?)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body: GetResponse = response.json().await.map_err(transport_error)?;
                Ok(Some(body.value))
            }
            _ => Err(rejected(response).await),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let request = SetRequest {
            key: key.to_string(),
            value,
            ttl: Some(ttl_secs(ttl)),
        };
        let response = self
            .client
            .put(self.url(&["set"])?)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejected(response).await)
        }
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        let mut deleted = 0;
        for key in keys {
            let response = self
                .client
                .delete(self.url(&["del", key])?)
                .send()
                .await
                .map_err(transport_error)?;

            match response.status() {
                StatusCode::NOT_FOUND => {}
                status if status.is_success() => deleted += 1,
                _ => return Err(rejected(response).await),
            }
        }
        Ok(deleted)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.url(&["keys"])?)
            .query(&[("pattern", pattern)])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }
        let body: KeysResponse = response.json().await.map_err(transport_error)?;
        Ok(body.keys)
    }
}
