//! Storage trait behind the reading cache.

use crate::cache::types::{CacheEntry, CacheError, CacheKey};

/// Persistence medium for cache entries.
///
/// Implementations only store and return entries. Expiry and version checks
/// belong to [`ReadingCache`](super::ReadingCache), so any medium gets the
/// same freshness contract.
///
/// `store` must replace an existing entry for the same key as a whole;
/// readers see either the old entry or the new one.
pub trait ReadingStore: Send + Sync {
    /// Loads the entry for `key`, live or not.
    ///
    /// Returns `Ok(None)` when nothing is stored under the key.
    fn load(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError>;

    /// Stores `entry` under its own key, replacing any previous entry.
    fn store(&self, entry: CacheEntry) -> Result<(), CacheError>;

    /// Removes every entry.
    fn clear(&self) -> Result<(), CacheError>;

    /// Short name for log output.
    fn name(&self) -> &'static str;
}

/// Store that never keeps anything.
///
/// Used when caching is disabled in configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStore;

impl ReadingStore for NoOpStore {
    fn load(&self, _key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        Ok(None)
    }

    fn store(&self, _entry: CacheEntry) -> Result<(), CacheError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
