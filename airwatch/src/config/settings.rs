//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::aqi::ClassificationMode;
use crate::coord::Coordinate;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Data source settings
    pub source: SourceSettings,
    /// Reading cache settings
    pub cache: CacheSettings,
    /// Location fallback settings
    pub location: LocationSettings,
    /// AQI classification settings
    pub aqi: AqiSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Data source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    /// Endpoint URL template with `{lat}` and `{lon}` placeholders
    pub url: String,
    /// Forecast endpoint URL template with an `{id}` placeholder
    pub forecast_url: String,
    /// API credential, sent only when set
    pub api_key: Option<String>,
    /// Header the credential is sent in
    pub api_key_header: String,
    /// Per-attempt timeout in seconds
    pub timeout: u64,
    /// Attempts per fetch
    pub max_retries: u32,
    /// Wait between attempts in milliseconds
    pub retry_delay_ms: u64,
}

/// Where cache entries are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    #[default]
    Disk,
    Memory,
}

impl CacheBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackend::Disk => "disk",
            CacheBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disk" => Ok(CacheBackend::Disk),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Reading cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Whether readings are cached at all
    pub enabled: bool,
    /// Storage medium
    pub backend: CacheBackend,
    /// Directory for the disk backend
    pub directory: PathBuf,
    /// Time-to-live in minutes
    pub ttl_minutes: u64,
    /// Entries written with another version are ignored
    pub schema_version: u32,
    /// Decimal places coordinates are rounded to for the cache key
    pub key_precision: usize,
}

/// Location configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    pub fallback_latitude: f64,
    pub fallback_longitude: f64,
}

impl LocationSettings {
    /// Fallback origin as a coordinate.
    pub fn fallback(&self) -> Coordinate {
        Coordinate::new(self.fallback_latitude, self.fallback_longitude)
    }
}

/// AQI configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AqiSettings {
    /// Scale readings are classified on
    pub classification: ClassificationMode,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory the log file is written to
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}
