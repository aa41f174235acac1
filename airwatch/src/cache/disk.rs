//! On-disk reading store.
//!
//! One JSON file per key in a flat directory:
//! ```text
//! {directory}/{key_hash}.json
//! ```
//! The key is hashed with SHA-256 to a safe filename that stays the same
//! across builds. Writes go to a unique temp file that is renamed over the
//! target, so a reader never sees a partial entry.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::cache::r#trait::ReadingStore;
use crate::cache::types::{CacheEntry, CacheError, CacheKey};

const ENTRY_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// Reading store backed by JSON files.
#[derive(Debug)]
pub struct DiskStore {
    directory: PathBuf,
    temp_counter: AtomicU64,
}

impl DiskStore {
    /// Opens a store in `directory`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            temp_counter: AtomicU64::new(0),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn key_path(&self, key: &CacheKey) -> PathBuf {
        self.directory.join(entry_file_name(key))
    }

    fn temp_path(&self, target: &Path) -> PathBuf {
        let n = self.temp_counter.fetch_add(1, Ordering::Relaxed);
        target.with_extension(format!("{}.{}.{}", std::process::id(), n, TEMP_EXTENSION))
    }
}

/// Lowercase hex SHA-256 of the key, plus the entry extension.
fn entry_file_name(key: &CacheKey) -> String {
    let digest = Sha256::digest(key.as_str().as_bytes());
    format!("{:x}.{}", digest, ENTRY_EXTENSION)
}

impl ReadingStore for DiskStore {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let path = self.key_path(key);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io(e)),
        };

        let entry: CacheEntry = serde_json::from_slice(&data)?;
        // Hash collision: the file belongs to another key
        if &entry.key != key {
            debug!(key = %key, stored = %entry.key, "Disk cache key collision");
            return Ok(None);
        }
        Ok(Some(entry))
    }

    fn store(&self, entry: CacheEntry) -> Result<(), CacheError> {
        let path = self.key_path(&entry.key);
        let data = serde_json::to_vec(&entry)?;

        let temp_path = self.temp_path(&path);
        if let Err(e) = fs::write(&temp_path, &data) {
            let _ = fs::remove_file(&temp_path);
            return Err(CacheError::Io(e));
        }
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(CacheError::Io(e));
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CacheError::Io(e)),
        };

        let mut removed = 0usize;
        for entry in entries {
            let path = entry?.path();
            let ours = path
                .extension()
                .is_some_and(|ext| ext == ENTRY_EXTENSION || ext == TEMP_EXTENSION);
            if ours && path.is_file() {
                match fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(CacheError::Io(e)),
                }
            }
        }

        debug!(dir = %self.directory.display(), removed, "Disk cache cleared");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "disk"
    }
}
