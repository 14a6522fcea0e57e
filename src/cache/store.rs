//! Memory Store Module
//!
//! In-process key-value engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{glob_match, CacheEntry, CacheStats, LruTracker};
use crate::error::{CacheError, Result};

// == Memory Store ==
/// In-memory storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new MemoryStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the store can hold
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a key-value pair, replacing any previous value and TTL.
    ///
    /// Key and value sizes are not bounded here; request limits belong to the
    /// HTTP layer. If the store is at capacity, the least recently used entry is evicted.
    pub fn set(&mut self, key: String, value: String, ttl: Option<Duration>) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(CacheError::CacheFull(
                        "Cache is full and eviction failed".to_string(),
                    ))
                }
            }
        }

        let entry = CacheEntry::new(value, Some(ttl.unwrap_or(self.default_ttl)));
        self.lru.touch(&key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are removed on access and counted as misses.
    pub fn get(&mut self, key: &str) -> Result<String> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };

        if entry.is_expired() {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return Err(CacheError::Expired(key.to_string()));
        }

        let value = entry.value.clone();
        self.stats.record_hit();
        self.lru.touch(key);
        Ok(value)
    }

    // == Delete ==
    /// Removes an entry by key.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.remove_entry(key);
                self.stats.record_deletions(1);
                Ok(())
            }
            Some(_) => {
                self.remove_entry(key);
                self.stats.record_expirations(1);
                Err(CacheError::Expired(key.to_string()))
            }
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Delete Many ==
    /// Removes every listed key that holds a live entry.
    ///
    /// Returns the number of entries actually deleted; missing and expired
    /// keys are skipped.
    pub fn delete_many<S: AsRef<str>>(&mut self, keys: &[S]) -> usize {
        let mut deleted = 0;
        for key in keys {
            if self.delete(key.as_ref()).is_ok() {
                deleted += 1;
            }
        }
        deleted
    }

    // == Keys ==
    /// Lists live keys matching a glob pattern, sorted.
    pub fn keys(&self, pattern: &str) -> Vec<String> {
        let now = current_timestamp_ms();
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, entry)| !entry.is_expired_at(now) && glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort_unstable();
        keys
    }

    // == TTL ==
    /// Returns the remaining lifetime of a live entry.
    ///
    /// `Ok(None)` means the entry never expires.
    pub fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => Err(CacheError::Expired(key.to_string())),
            Some(entry) => Ok(entry.ttl_remaining()),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
    }
}
