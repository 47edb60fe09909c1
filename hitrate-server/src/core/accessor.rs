use super::clock::{Clock, SystemClock};
use super::error::{HitrateError, Result};
use super::source::DataSource;
use super::types::{CacheConfig, CacheEntry, CacheStats, Item, KeyStatus};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Cache-aside read-through accessor over a [`DataSource`].
///
/// Reads check the in-memory store first; a miss loads from the source and
/// stores the result for the configured TTL. Loads are serialized per key:
/// concurrent misses for the same key share a single source fetch, and the
/// callers that were blocked behind the winning loader observe its entry as
/// a hit.
///
/// The store is only written by a successful load or an explicit
/// [`invalidate`](Self::invalidate) call; a failed load leaves it untouched.
#[derive(Clone)]
pub struct CacheAsideAccessor {
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    store: Arc<RwLock<HashMap<String, CacheEntry>>>,
    loaders: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
    stats: Arc<RwLock<CacheStats>>,
}

impl CacheAsideAccessor {
    /// Create an accessor backed by the system clock
    pub fn new(source: Arc<dyn DataSource>, config: CacheConfig) -> Self {
        Self::with_clock(source, config, Arc::new(SystemClock))
    }

    /// Create an accessor with an injected time source
    pub fn with_clock(
        source: Arc<dyn DataSource>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ttl_secs = if config.default_ttl_secs == 0 {
            warn!("Cache TTL of 0s is invalid, clamping to 1s");
            1
        } else {
            config.default_ttl_secs
        };

        info!("Initializing cache-aside accessor with ttl={}s", ttl_secs);

        Self {
            source,
            clock,
            ttl: Duration::from_secs(ttl_secs),
            store: Arc::new(RwLock::new(HashMap::new())),
            loaders: Arc::new(Mutex::new(HashMap::new())),
            stats: Arc::new(RwLock::new(CacheStats::default())),
        }
    }

    /// Return the value for `key`, loading it from the source on a miss.
    ///
    /// The boolean is `true` when the value came from the cache. Source
    /// failures propagate as-is and leave the store unchanged.
    pub async fn get_or_load(&self, key: &str) -> Result<(Arc<[Item]>, bool)> {
        if key.is_empty() {
            return Err(HitrateError::InvalidKey);
        }

        if let Some(value) = self.lookup_fresh(key) {
            debug!("Cache HIT key={}", key);
            self.stats.write().hits += 1;
            return Ok((value, true));
        }

        // Serialize loads per key so a cold key costs one source fetch no
        // matter how many callers race on it.
        let loader = self.loader_for(key);
        let _guard = loader.lock().await;

        if let Some(value) = self.lookup_fresh(key) {
            debug!("Cache HIT key={} (populated while waiting)", key);
            self.stats.write().hits += 1;
            return Ok((value, true));
        }

        debug!("Cache MISS key={}, loading from source", key);
        let items = self.source.fetch_all().await?;
        let value: Arc<[Item]> = items.into();

        let entry = CacheEntry::new(value.clone(), self.clock.now(), self.ttl);
        self.store.write().insert(key.to_string(), entry);

        let mut stats = self.stats.write();
        stats.misses += 1;
        stats.loads += 1;

        Ok((value, false))
    }

    /// Drop any entry for `key`. Idempotent: absent keys are a no-op.
    pub fn invalidate(&self, key: &str) {
        if self.store.write().remove(key).is_some() {
            debug!("Cache INVALIDATE key={}", key);
        }
        self.stats.write().invalidations += 1;
    }

    /// Observable state of `key`, without touching the store or the stats.
    ///
    /// `get_or_load` turns a miss into a hit, so callers that want to report
    /// the pre-call state must peek first.
    pub fn peek_status(&self, key: &str) -> KeyStatus {
        let store = self.store.read();
        match store.get(key) {
            Some(entry) if entry.is_fresh(self.clock.now()) => KeyStatus::Hit,
            Some(_) => KeyStatus::Miss,
            None => KeyStatus::Absent,
        }
    }

    /// Counter snapshot
    pub fn stats(&self) -> CacheStats {
        self.stats.read().clone()
    }

    fn lookup_fresh(&self, key: &str) -> Option<Arc<[Item]>> {
        let store = self.store.read();
        let entry = store.get(key)?;
        entry
            .is_fresh(self.clock.now())
            .then(|| entry.value.clone())
    }

    // Guard mutexes are created on demand and retained; key cardinality
    // equals the number of distinct cache keys callers use.
    fn loader_for(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut loaders = self.loaders.lock();
        loaders.entry(key.to_string()).or_default().clone()
    }
}
