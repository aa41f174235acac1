//! Core types for the reading cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::aqi::ClassificationMode;
use crate::coord::Coordinate;
use crate::reading::Reading;

/// Default number of decimal places a coordinate is quantized to.
///
/// Three places is roughly 110 m of latitude, well inside the spacing of
/// monitoring stations.
pub const DEFAULT_KEY_PRECISION: usize = 3;

/// Cache key derived from a quantized coordinate.
///
/// Nearby origins that round to the same grid point share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds the key for `coordinate` rounded to `precision` decimals.
    ///
    /// # Example
    ///
    /// ```
    /// use airwatch::cache::CacheKey;
    /// use airwatch::coord::Coordinate;
    ///
    /// let a = CacheKey::from_coordinate(Coordinate::new(14.99071, 100.47801), 3);
    /// let b = CacheKey::from_coordinate(Coordinate::new(14.99069, 100.47799), 3);
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str(), "14.991,100.478");
    /// ```
    pub fn from_coordinate(coordinate: Coordinate, precision: usize) -> Self {
        let lat = quantize(coordinate.latitude, precision);
        let lon = quantize(coordinate.longitude, precision);
        Self(format!("{:.*},{:.*}", precision, lat, precision, lon))
    }

    /// Scopes the key to a classification mode.
    ///
    /// Readings carry a tier derived from the mode, so entries computed
    /// under one mode must not be served under the other.
    pub fn with_mode(self, mode: ClassificationMode) -> Self {
        Self(format!("{}|{}", self.0, mode))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn quantize(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision.min(12) as i32);
    let rounded = (value * factor).round() / factor;
    // Fold -0.0 into 0.0 so both hemispheres of zero share a key
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A stored reading plus the metadata that decides whether it is live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub reading: Reading,
    pub stored_at: DateTime<Utc>,
    pub schema_version: u32,
}

/// Cache-related errors.
///
/// These never leave [`ReadingCache`](super::ReadingCache); a failing store
/// behaves as an empty one.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error during cache operations
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry could not be encoded or decoded
    #[error("Cache entry serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to acquire lock
    #[error("Failed to acquire cache lock")]
    LockPoisoned,
}
