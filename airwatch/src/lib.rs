//! airwatch - air quality at the nearest monitoring station
//!
//! Given a coordinate, airwatch finds the closest PM2.5 monitoring station,
//! corrects its raw sensor reading, converts it to a US AQI value and
//! classifies it into a severity tier. Results are cached per location for
//! a configurable time.
//!
//! # High-Level API
//!
//! The [`service`] module ties everything together:
//!
//! ```ignore
//! use std::sync::Arc;
//! use airwatch::cache::ReadingCache;
//! use airwatch::config::ConfigFile;
//! use airwatch::fetch::AsyncReqwestClient;
//! use airwatch::service::AirQualityResolver;
//! use airwatch::time::SystemClock;
//!
//! let file = ConfigFile::load()?;
//! let config = file.resolver_config();
//! let clock = Arc::new(SystemClock);
//! let cache = ReadingCache::new(Arc::from(file.reading_store()?), config.cache_ttl(), clock.clone());
//! let client = AsyncReqwestClient::new(config.timeout())?;
//! let resolver = AirQualityResolver::new(client, cache, config, clock);
//!
//! let origin = file.fallback_location().locate().await;
//! let reading = resolver.resolve_within(origin, Duration::from_secs(60)).await?;
//! println!("{} ({})", reading.tier, reading.aqi.unwrap_or(500));
//! ```

pub mod aqi;
pub mod cache;
pub mod config;
pub mod coord;
pub mod fetch;
pub mod location;
pub mod logging;
pub mod reading;
pub mod service;
pub mod station;
pub mod time;

/// Version of the airwatch library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
