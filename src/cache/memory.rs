//! In-process cache backend.
//!
//! Entries live in an LRU map bounded by [`CacheConfig::capacity`]. Each entry
//! records an absolute expiry taken from the injected [`Clock`]; expired
//! entries are dropped when they are next read.

use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use async_trait::async_trait;
use lru::LruCache;
use metrics::counter;
use time::OffsetDateTime;

use super::{
    backend::{CacheBackend, CacheError},
    clock::{Clock, SystemClock},
    config::CacheConfig,
    lock::{rw_read, rw_write},
};

const SOURCE: &str = "cache::memory";

struct CacheEntry {
    payload: String,
    expires_at: OffsetDateTime,
}

pub struct MemoryCache {
    entries: RwLock<LruCache<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(config.capacity_non_zero())),
            clock,
        }
    }

    /// Number of stored entries, including ones that expired but were not read since.
    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        rw_write(&self.entries, SOURCE, "clear").clear();
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let mut entries = rw_write(&self.entries, SOURCE, "get");

        let live = match entries.get(key) {
            None => {
                counter!("zorpido_cache_miss_total").increment(1);
                return None;
            }
            Some(entry) if entry.expires_at > now => Some(entry.payload.clone()),
            Some(_) => None,
        };

        match live {
            Some(payload) => {
                counter!("zorpido_cache_hit_total").increment(1);
                Some(payload)
            }
            None => {
                entries.pop(key);
                counter!("zorpido_cache_expired_total").increment(1);
                counter!("zorpido_cache_miss_total").increment(1);
                None
            }
        }
    }

    fn store(&self, key: &str, payload: String, ttl: Duration) -> Result<(), CacheError> {
        if ttl.is_zero() {
            rw_write(&self.entries, SOURCE, "set").pop(key);
            return Ok(());
        }

        let expires_at = time::Duration::try_from(ttl)
            .ok()
            .and_then(|ttl| self.clock.now().checked_add(ttl))
            .ok_or(CacheError::TtlOutOfRange(ttl))?;

        let mut entries = rw_write(&self.entries, SOURCE, "set");
        let entry = CacheEntry {
            payload,
            expires_at,
        };
        if let Some((evicted, _)) = entries.push(key.to_string(), entry) {
            if evicted != key {
                counter!("zorpido_cache_evict_total").increment(1);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.lookup(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.store(key, value, ttl)
    }
}
