//! Versioned, time-limited cache of computed readings.
//!
//! [`ReadingCache`] applies the TTL and schema-version rules; the storage
//! medium behind it is any [`ReadingStore`].

mod disk;
mod memory;
mod r#trait;
mod ttl;
mod types;

pub use disk::DiskStore;
pub use memory::MemoryStore;
pub use r#trait::{NoOpStore, ReadingStore};
pub use ttl::{ReadingCache, DEFAULT_TTL_MINUTES};
pub use types::{CacheEntry, CacheError, CacheKey, DEFAULT_KEY_PRECISION};
