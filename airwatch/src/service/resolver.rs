//! Nearest-station air quality resolution.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::ResolverConfig;
use super::error::ResolveError;
use crate::cache::{CacheKey, ReadingCache};
use crate::coord::Coordinate;
use crate::fetch::{AsyncHttpClient, JsonFetcher};
use crate::reading::Reading;
use crate::station::{nearest, parse_candidates};
use crate::time::Clock;

/// Resolves a coordinate into the air quality reading of its nearest
/// monitoring station.
///
/// Fresh cached readings are returned without touching the network.
/// Otherwise the station list is fetched, the closest station chosen, its
/// concentration converted, and the result cached for later calls.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use airwatch::cache::{MemoryStore, ReadingCache};
/// use airwatch::fetch::AsyncReqwestClient;
/// use airwatch::service::{AirQualityResolver, ResolverConfig};
/// use airwatch::time::SystemClock;
///
/// let config = ResolverConfig::default();
/// let clock = Arc::new(SystemClock);
/// let cache = ReadingCache::new(Arc::new(MemoryStore::new()), config.cache_ttl(), clock.clone());
/// let client = AsyncReqwestClient::new(config.timeout())?;
/// let resolver = AirQualityResolver::new(client, cache, config, clock);
///
/// let reading = resolver.resolve_within(origin, Duration::from_secs(30)).await?;
/// ```
pub struct AirQualityResolver<C> {
    fetcher: JsonFetcher<C>,
    cache: ReadingCache,
    config: ResolverConfig,
    clock: Arc<dyn Clock>,
}

impl<C: AsyncHttpClient> AirQualityResolver<C> {
    /// # Arguments
    ///
    /// * `client` - HTTP transport for the data source
    /// * `cache` - Reading cache; use a `NoOpStore` to disable caching
    /// * `config` - Endpoint, retry and classification settings
    /// * `clock` - Time source stamped on new readings
    pub fn new(
        client: C,
        cache: ReadingCache,
        config: ResolverConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let fetcher = JsonFetcher::new(client, config.timeout(), config.retry());
        Self {
            fetcher,
            cache,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &ReadingCache {
        &self.cache
    }

    /// Cache key used for `origin` under the configured classification mode.
    pub fn cache_key(&self, origin: Coordinate) -> CacheKey {
        CacheKey::from_coordinate(origin, self.config.key_precision())
            .with_mode(self.config.classification())
    }

    /// Resolves the reading for `origin`.
    ///
    /// # Errors
    ///
    /// * [`ResolveError::Cancelled`] when `cancel` fires before a result
    /// * [`ResolveError::Fetch`] once every fetch attempt has failed
    /// * [`ResolveError::Payload`] for a response with no usable station, or
    ///   when the nearest station reports no PM2.5
    /// * [`ResolveError::Aqi`] when the chosen station's PM2.5 is invalid
    pub async fn resolve(
        &self,
        origin: Coordinate,
        cancel: &CancellationToken,
    ) -> Result<Reading, ResolveError> {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let key = self.cache_key(origin);
        let schema_version = self.config.schema_version();
        if let Some(reading) = self.cache.get(&key, schema_version) {
            debug!(key = %key, station = %reading.station_id, "Serving cached reading");
            return Ok(reading);
        }

        let url = self.config.url_for(origin);
        let payload = self
            .fetcher
            .fetch_json(&url, &self.config.headers(), cancel)
            .await?;

        let candidates = parse_candidates(&payload)?;
        let (station, distance_km) = nearest(origin, &candidates)?;
        debug!(
            candidates = candidates.len(),
            station = %station.id,
            distance_km,
            "Selected nearest station"
        );

        let pm25 = station.concentration()?;
        let reading = Reading::compute(
            station,
            pm25,
            distance_km,
            self.config.classification(),
            self.clock.now(),
        )?;

        self.cache.put(key, reading.clone(), schema_version);

        info!(
            origin = %origin,
            station = %reading.station_id,
            distance_km = reading.distance_km,
            pm25 = reading.pm25_corrected,
            aqi = ?reading.aqi,
            tier = %reading.tier,
            "Resolved air quality"
        );
        Ok(reading)
    }

    /// Fetches the forecast document for a station.
    ///
    /// The document is returned as the source sent it and is not cached.
    /// Fetching goes through the same retry policy, headers and
    /// cancellation as [`resolve`](Self::resolve).
    ///
    /// # Errors
    ///
    /// * [`ResolveError::InvalidStationId`] for an empty id or one with
    ///   characters other than letters, digits, `-` or `_`
    /// * [`ResolveError::Cancelled`] when `cancel` fires before a result
    /// * [`ResolveError::Fetch`] once every fetch attempt has failed
    pub async fn forecast(
        &self,
        station_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Value, ResolveError> {
        if !is_valid_station_id(station_id) {
            return Err(ResolveError::InvalidStationId(station_id.to_string()));
        }
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let url = self.config.forecast_url_for(station_id);
        let forecast = self
            .fetcher
            .fetch_json(&url, &self.config.headers(), cancel)
            .await?;
        info!(station = station_id, "Fetched station forecast");
        Ok(forecast)
    }

    /// Resolves the reading for `origin`, giving up after `deadline`.
    ///
    /// A missed deadline aborts any request or retry wait in progress and
    /// returns [`ResolveError::Cancelled`].
    pub async fn resolve_within(
        &self,
        origin: Coordinate,
        deadline: Duration,
    ) -> Result<Reading, ResolveError> {
        let cancel = CancellationToken::new();
        match tokio::time::timeout(deadline, self.resolve(origin, &cancel)).await {
            Ok(result) => result,
            Err(_) => {
                cancel.cancel();
                warn!(origin = %origin, deadline_ms = deadline.as_millis() as u64, "Resolution deadline exceeded");
                Err(ResolveError::Cancelled)
            }
        }
    }
}

fn is_valid_station_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
