//! Cache Entry Module
//!
//! The JSON envelope persisted for every cached payload.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A cached payload paired with its capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached value
    pub payload: T,
    /// Capture timestamp (Unix milliseconds)
    pub timestamp: i64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry captured at `timestamp` (Unix milliseconds).
    pub fn new(payload: T, timestamp: i64) -> Self {
        Self { payload, timestamp }
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl` at time `now`.
    ///
    /// An entry is stale only once its age strictly exceeds the TTL.
    /// Timestamps in the future count as fresh.
    pub fn is_expired_at(&self, ttl: Duration, now: i64) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(self.timestamp) > ttl_ms
    }

    /// Age of the entry in milliseconds at time `now`, never negative.
    pub fn age_ms(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp).max(0)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
