//! Freshness rules on top of a [`ReadingStore`].

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use crate::cache::r#trait::ReadingStore;
use crate::cache::types::{CacheEntry, CacheError, CacheKey};
use crate::reading::Reading;
use crate::time::Clock;

/// Default time-to-live for a cached reading.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// Reading cache with TTL and schema-version checks.
///
/// An entry is live while `now - stored_at <= ttl` and its schema version
/// matches the caller's. Dead entries stay in the store until the next
/// `put` for the same key replaces them.
///
/// Store failures never escape: a failed load is a miss and a failed
/// store is dropped, both logged at warn level.
pub struct ReadingCache {
    store: Arc<dyn ReadingStore>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ReadingCache {
    /// # Arguments
    ///
    /// * `store` - Persistence medium
    /// * `ttl` - Maximum age of a live entry
    /// * `clock` - Time source for `stored_at` and expiry
    pub fn new(store: Arc<dyn ReadingStore>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { store, ttl, clock }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live reading for `key`, if there is one.
    pub fn get(&self, key: &CacheKey, schema_version: u32) -> Option<Reading> {
        let entry = match self.store.load(key) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = %key, store = self.store.name(), error = %e, "Cache unavailable, treating as miss");
                return None;
            }
        };

        if entry.schema_version != schema_version {
            debug!(
                key = %key,
                stored = entry.schema_version,
                current = schema_version,
                "Cache entry has stale schema"
            );
            return None;
        }

        let age = self.clock.now() - entry.stored_at;
        if age > self.ttl {
            debug!(key = %key, age_secs = age.num_seconds(), "Cache entry expired");
            return None;
        }

        debug!(key = %key, age_secs = age.num_seconds(), "Cache hit");
        Some(entry.reading)
    }

    /// Stores `reading` under `key`, stamped with the current time.
    pub fn put(&self, key: CacheKey, reading: Reading, schema_version: u32) {
        let entry = CacheEntry {
            key,
            reading,
            stored_at: self.clock.now(),
            schema_version,
        };
        let key = entry.key.clone();
        if let Err(e) = self.store.store(entry) {
            warn!(key = %key, store = self.store.name(), error = %e, "Cache write failed, continuing without caching");
        }
    }

    /// Removes every stored entry.
    ///
    /// Unlike `get` and `put` this reports failure, since the caller asked
    /// for it explicitly.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.clear()
    }
}
