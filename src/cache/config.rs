use std::time::Duration;

use crate::constants::DEFAULT_CACHE_TTL_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result cache settings.
pub struct CacheConfig {
    /// `false` bypasses both lookup and insert.
    pub enabled: bool,
    /// Age after which an entry is no longer served.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl CacheConfig {
    pub fn disabled() -> Self {
        Self::default().with_enabled(false)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}
