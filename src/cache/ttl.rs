//! TTL Cache Module
//!
//! Generic time-boxed cache over [`Storage`]. Reads never fail: a missing
//! key, a corrupt envelope or unavailable storage all read as a miss, and
//! a stale entry is deleted as it is read. Writes are best-effort.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, warn};

use super::{current_timestamp_ms, CacheCounters, CacheEntry, CacheStats, Storage};

// == TTL Cache ==
/// Namespaced cache of `T` values with a fixed time-to-live.
pub struct TtlCache<T> {
    storage: Arc<dyn Storage>,
    namespace: String,
    ttl: Duration,
    counters: Arc<CacheCounters>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Clone for TtlCache<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            namespace: self.namespace.clone(),
            ttl: self.ttl,
            counters: Arc::clone(&self.counters),
            _payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("namespace", &self.namespace)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> TtlCache<T> {
    // == Constructor ==
    /// Creates a cache storing entries under `namespace` + key.
    ///
    /// # Arguments
    /// * `storage` - Shared backing storage
    /// * `namespace` - Key prefix separating this consumer's entries
    /// * `ttl` - Maximum entry age
    pub fn new(storage: Arc<dyn Storage>, namespace: impl Into<String>, ttl: Duration) -> Self {
        Self {
            storage,
            namespace: namespace.into(),
            ttl,
            counters: Arc::new(CacheCounters::default()),
            _payload: PhantomData,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Full storage key for a cache key.
    pub fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    // == Get ==
    /// Reads a fresh value, or `None`.
    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, current_timestamp_ms())
    }

    /// Reads a fresh value as of `now` (Unix milliseconds).
    pub fn get_at(&self, key: &str, now: i64) -> Option<T> {
        let storage_key = self.storage_key(key);

        let raw = match self.storage.get_item(&storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.counters.record_miss();
                return None;
            }
            Err(err) => {
                debug!(key = %storage_key, %err, "cache read failed");
                self.counters.record_miss();
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(key = %storage_key, %err, "cache entry is corrupt");
                self.counters.record_miss();
                return None;
            }
        };

        if entry.is_expired_at(self.ttl, now) {
            debug!(key = %storage_key, age_ms = entry.age_ms(now), "cache entry expired");
            if let Err(err) = self.storage.remove_item(&storage_key) {
                warn!(key = %storage_key, %err, "failed to purge expired cache entry");
            }
            self.counters.record_expired(1);
            self.counters.record_miss();
            return None;
        }

        debug!(key = %storage_key, "cache hit");
        self.counters.record_hit();
        Some(entry.payload)
    }

    // == Set ==
    /// Stores a value captured now. Failures are logged and swallowed.
    pub fn set(&self, key: &str, value: &T) {
        self.set_at(key, value, current_timestamp_ms());
    }

    /// Stores a value captured at `timestamp` (Unix milliseconds).
    pub fn set_at(&self, key: &str, value: &T, timestamp: i64) {
        let storage_key = self.storage_key(key);
        let result = serde_json::to_string(&CacheEntry::new(value, timestamp))
            .map_err(Into::into)
            .and_then(|raw| self.storage.set_item(&storage_key, &raw));

        if let Err(err) = result {
            warn!(key = %storage_key, %err, "cache write failed");
            self.counters.record_write_failure();
        }
    }

    // == Sweep ==
    /// Deletes every expired or unreadable entry of this namespace as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired_at(&self, now: i64) -> usize {
        let keys = match self.storage.keys() {
            Ok(keys) => keys,
            Err(err) => {
                warn!(namespace = %self.namespace, %err, "cache sweep skipped");
                return 0;
            }
        };

        let mut removed = 0;
        for key in keys.iter().filter(|k| k.starts_with(&self.namespace)) {
            let stale = match self.storage.get_item(key) {
                Ok(Some(raw)) => serde_json::from_str::<CacheEntry<IgnoredAny>>(&raw)
                    .map_or(true, |entry| entry.is_expired_at(self.ttl, now)),
                _ => false,
            };
            if stale && self.storage.remove_item(key).is_ok() {
                removed += 1;
            }
        }

        self.counters.record_expired(removed as u64);
        removed
    }

    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(current_timestamp_ms())
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}
