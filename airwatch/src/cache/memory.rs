//! In-process reading store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::cache::r#trait::ReadingStore;
use crate::cache::types::{CacheEntry, CacheError, CacheKey};

/// Reading store held in a mutex-guarded map.
///
/// Entries live as long as the store. Suitable for long-running callers
/// and tests; the CLI uses [`DiskStore`](super::DiskStore) instead.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, live or not.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReadingStore for MemoryStore {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, entry: CacheEntry) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::LockPoisoned)?;
        entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::LockPoisoned)?
            .clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::r#trait::tests::sample_entry;
    use std::sync::Arc;

    #[test]
    fn test_load_missing() {
        let store = MemoryStore::new();
        let key = sample_entry("1.0,2.0", "a").key;
        assert!(store.load(&key).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_then_load() {
        let store = MemoryStore::new();
        let entry = sample_entry("1.0,2.0", "a");
        store.store(entry.clone()).unwrap();

        assert_eq!(store.load(&entry.key).unwrap(), Some(entry));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_replaces() {
        let store = MemoryStore::new();
        let first = sample_entry("1.0,2.0", "a");
        let second = sample_entry("1.0,2.0", "b");
        store.store(first).unwrap();
        store.store(second.clone()).unwrap();

        let loaded = store.load(&second.key).unwrap().unwrap();
        assert_eq!(loaded.reading.station_id, "b");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        store.store(sample_entry("1.0,2.0", "a")).unwrap();
        store.store(sample_entry("3.0,4.0", "b")).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_writers_leave_one_whole_entry() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .store(sample_entry("1.0,2.0", &format!("s{}", i)))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let key = sample_entry("1.0,2.0", "x").key;
        let loaded = store.load(&key).unwrap().unwrap();
        assert!(loaded.reading.station_id.starts_with('s'));
        assert_eq!(store.len(), 1);
    }
}
