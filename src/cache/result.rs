//! Exact-match response cache (in-memory).
//!
//! Keys are the BLAKE3 hash of the raw query text, so `"Audio"`, `"audio"` and
//! `"audio "` are distinct entries. Entries expire after the configured TTL and are
//! otherwise never evicted.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use tracing::debug;

use super::config::CacheConfig;
use crate::constants::MAX_CACHE_TTL_SECS;
use crate::hashing::hash_query;

/// A memoized response and when it was stored.
#[derive(Debug)]
pub struct CachedResponse<T> {
    pub query: String,
    pub response: Arc<T>,
    pub inserted_at: DateTime<Utc>,
}

/// Query → response memo with a time-to-live.
pub struct ResultCache<T> {
    entries: Cache<[u8; 32], Arc<CachedResponse<T>>>,
    config: CacheConfig,
}

impl<T: Send + Sync + 'static> ResultCache<T> {
    /// Builds the cache. TTLs beyond [`MAX_CACHE_TTL_SECS`] are capped.
    pub fn new(config: CacheConfig) -> Self {
        let ttl = config.ttl.min(Duration::from_secs(MAX_CACHE_TTL_SECS));
        Self {
            entries: Cache::builder().time_to_live(ttl).build(),
            config,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Cached response for exactly `query`, if present and not expired.
    pub fn get(&self, query: &str) -> Option<Arc<T>> {
        self.entry(query).map(|entry| Arc::clone(&entry.response))
    }

    /// Full cache entry for exactly `query`.
    pub fn entry(&self, query: &str) -> Option<Arc<CachedResponse<T>>> {
        if !self.config.enabled {
            return None;
        }

        let hit = self
            .entries
            .get(&hash_query(query))
            .filter(|entry| entry.query == query);
        debug!(hit = hit.is_some(), "Result cache lookup");
        hit
    }

    /// Stores `response` for `query` (last writer wins).
    pub fn insert(&self, query: &str, response: Arc<T>) {
        if !self.config.enabled {
            return;
        }

        self.entries.insert(
            hash_query(query),
            Arc::new(CachedResponse {
                query: query.to_string(),
                response,
                inserted_at: Utc::now(),
            }),
        );
    }

    /// Removes the entry for `query`.
    pub fn invalidate(&self, query: &str) {
        self.entries.invalidate(&hash_query(query));
    }

    /// Returns the number of cached entries (after pending maintenance).
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl<T: Send + Sync + 'static> std::fmt::Debug for ResultCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.entries.entry_count())
            .field("config", &self.config)
            .finish()
    }
}
