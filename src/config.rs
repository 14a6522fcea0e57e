//! Configuration Module
//!
//! Handles loading server and method cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            max_entries: env_or("MAX_ENTRIES", 1000),
            default_ttl: env_or("DEFAULT_TTL", 300),
            server_port: env_or("SERVER_PORT", 3000),
            cleanup_interval: env_or("CLEANUP_INTERVAL", 1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 300,
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}

// == Method Cache Config ==
/// Key prefix and TTL policy for the method cache.
///
/// `empty_expire` is used when a method returns an empty result, so that
/// expensive "no data" lookups are cached only briefly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Prepended verbatim (then lowercased) to every key
    pub prefix: String,
    /// TTL for non-empty results
    pub expire: Duration,
    /// TTL for empty results
    pub empty_expire: Duration,
}

impl CacheConfig {
    /// Loads the method cache configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `METHOD_CACHE_PREFIX` - Key prefix (default: empty)
    /// - `METHOD_CACHE_EXPIRE` - TTL in seconds for results (default: 3600)
    /// - `METHOD_CACHE_EMPTY_EXPIRE` - TTL in seconds for empty results (default: 10)
    pub fn from_env() -> Self {
        Self {
            prefix: env::var("METHOD_CACHE_PREFIX").unwrap_or_default(),
            expire: Duration::from_secs(env_or("METHOD_CACHE_EXPIRE", 3600)),
            empty_expire: Duration::from_secs(env_or("METHOD_CACHE_EMPTY_EXPIRE", 10)),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_expire(mut self, expire: Duration) -> Self {
        self.expire = expire;
        self
    }

    pub fn with_empty_expire(mut self, empty_expire: Duration) -> Self {
        self.empty_expire = empty_expire;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            expire: Duration::from_secs(3600),
            empty_expire: Duration::from_secs(10),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
