//! Configuration file handling for ~/.airwatch/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::settings::{CacheBackend, ConfigFile};
use crate::cache::{DiskStore, MemoryStore, NoOpStore, ReadingStore};
use crate::fetch::RetryPolicy;
use crate::location::FallbackLocation;
use crate::service::ResolverConfig;

/// Ten years; longer TTLs are treated as this.
const MAX_TTL_MINUTES: u64 = 10 * 365 * 24 * 60;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.airwatch/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.airwatch/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
        }
        Ok(path)
    }

    /// Runtime resolver settings derived from this file.
    pub fn resolver_config(&self) -> ResolverConfig {
        let mut builder = ResolverConfig::builder()
            .url_template(self.source.url.clone())
            .forecast_url_template(self.source.forecast_url.clone())
            .api_key_header(self.source.api_key_header.clone())
            .timeout(Duration::from_secs(self.source.timeout))
            .retry(RetryPolicy::new(
                self.source.max_retries,
                Duration::from_millis(self.source.retry_delay_ms),
            ))
            .cache_ttl(chrono::Duration::minutes(
                self.cache.ttl_minutes.min(MAX_TTL_MINUTES) as i64,
            ))
            .schema_version(self.cache.schema_version)
            .key_precision(self.cache.key_precision)
            .classification(self.aqi.classification);
        if let Some(key) = &self.source.api_key {
            builder = builder.api_key(key.clone());
        }
        builder.build()
    }

    /// Reading store selected by the `[cache]` section.
    ///
    /// # Errors
    ///
    /// Fails only when the disk backend's directory cannot be created.
    pub fn reading_store(&self) -> Result<Box<dyn ReadingStore>, crate::cache::CacheError> {
        if !self.cache.enabled {
            return Ok(Box::new(NoOpStore));
        }
        Ok(match self.cache.backend {
            CacheBackend::Disk => Box::new(DiskStore::open(&self.cache.directory)?),
            CacheBackend::Memory => Box::new(MemoryStore::new()),
        })
    }

    /// Location source that always yields the configured fallback.
    pub fn fallback_location(&self) -> FallbackLocation {
        FallbackLocation::fallback_only(self.location.fallback())
    }
}

/// Get the path to the config directory (~/.airwatch).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".airwatch")
}

/// Get the path to the config file (~/.airwatch/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
