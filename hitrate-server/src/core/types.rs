use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A row from the backing store. Opaque to the cache layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

/// Cached value with expiry metadata
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached item list, shared with callers
    pub value: Arc<[Item]>,
    /// When the entry was stored
    pub stored_at: Instant,
    /// How long the entry stays fresh
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(value: Arc<[Item]>, stored_at: Instant, ttl: Duration) -> Self {
        Self {
            value,
            stored_at,
            ttl,
        }
    }

    /// Fresh while age is strictly below the TTL; an age exactly equal to
    /// the TTL counts as expired.
    pub fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// Observable cache state for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    /// A fresh entry exists
    Hit,
    /// An entry exists but has expired
    Miss,
    /// No entry exists
    Absent,
}

/// Configuration for the cache-aside accessor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached entry stays fresh
    pub default_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: 60,
        }
    }
}

/// Statistics for the cache-aside accessor
#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheStats {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that had to load from the source
    pub misses: u64,
    /// Successful source loads
    pub loads: u64,
    /// Invalidation calls
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
