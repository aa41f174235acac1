//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::aqi::ClassificationMode;
use crate::cache::{DEFAULT_KEY_PRECISION, DEFAULT_TTL_MINUTES};
use crate::fetch::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT};
use crate::location::DEFAULT_FALLBACK;
use crate::service::{
    DEFAULT_API_KEY_HEADER, DEFAULT_FORECAST_URL_TEMPLATE, DEFAULT_SCHEMA_VERSION,
    DEFAULT_URL_TEMPLATE,
};

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "airwatch.log";

/// Largest accepted cache key precision.
pub const MAX_KEY_PRECISION: usize = 6;

/// Default disk cache directory (`~/.cache/airwatch` on Linux).
pub fn default_cache_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("airwatch")
}

/// Default log directory (`~/.airwatch/logs`).
pub fn default_log_directory() -> PathBuf {
    config_directory().join("logs")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            source: SourceSettings::default(),
            cache: CacheSettings::default(),
            location: LocationSettings::default(),
            aqi: AqiSettings {
                classification: ClassificationMode::Aqi,
            },
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL_TEMPLATE.to_string(),
            forecast_url: DEFAULT_FORECAST_URL_TEMPLATE.to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout: DEFAULT_TIMEOUT.as_secs(),
            max_retries: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY.as_millis() as u64,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: CacheBackend::Disk,
            directory: default_cache_directory(),
            ttl_minutes: DEFAULT_TTL_MINUTES as u64,
            schema_version: DEFAULT_SCHEMA_VERSION,
            key_precision: DEFAULT_KEY_PRECISION,
        }
    }
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            fallback_latitude: DEFAULT_FALLBACK.latitude,
            fallback_longitude: DEFAULT_FALLBACK.longitude,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}
