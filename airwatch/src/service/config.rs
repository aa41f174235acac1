//! Resolver configuration.

use std::time::Duration;

use crate::aqi::ClassificationMode;
use crate::cache::{DEFAULT_KEY_PRECISION, DEFAULT_TTL_MINUTES};
use crate::coord::Coordinate;
use crate::fetch::{RetryPolicy, DEFAULT_TIMEOUT};

/// Default station lookup endpoint. `{lat}` and `{lon}` are substituted.
pub const DEFAULT_URL_TEMPLATE: &str = "https://www-old.cmuccdc.org/api2/dustboy/near/{lat}/{lon}";

/// Default station forecast endpoint. `{id}` is substituted.
pub const DEFAULT_FORECAST_URL_TEMPLATE: &str =
    "https://www-old.cmuccdc.org/api2/dustboy/forecast/{id}";

/// Default header carrying the API credential.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Schema version stamped on cache entries written by this build.
pub const DEFAULT_SCHEMA_VERSION: u32 = 1;

/// Everything the resolver needs to know at runtime.
///
/// # Example
///
/// ```
/// use airwatch::coord::Coordinate;
/// use airwatch::service::ResolverConfig;
///
/// let config = ResolverConfig::builder()
///     .url_template("http://localhost/near/{lat}/{lon}")
///     .schema_version(2)
///     .build();
///
/// assert_eq!(
///     config.url_for(Coordinate::new(14.9907, 100.478)),
///     "http://localhost/near/14.9907/100.478"
/// );
/// assert_eq!(config.schema_version(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    url_template: String,
    forecast_url_template: String,
    api_key: Option<String>,
    api_key_header: String,
    timeout: Duration,
    retry: RetryPolicy,
    cache_ttl: chrono::Duration,
    schema_version: u32,
    key_precision: usize,
    classification: ClassificationMode,
}

impl ResolverConfig {
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }

    /// Request URL for a query origin.
    pub fn url_for(&self, origin: Coordinate) -> String {
        self.url_template
            .replace("{lat}", &origin.latitude.to_string())
            .replace("{lon}", &origin.longitude.to_string())
    }

    /// Forecast request URL for a station.
    pub fn forecast_url_for(&self, station_id: &str) -> String {
        self.forecast_url_template.replace("{id}", station_id)
    }

    /// Request headers; carries the API credential when one is configured.
    pub fn headers(&self) -> Vec<(&str, &str)> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => vec![(self.api_key_header.as_str(), key)],
            _ => Vec::new(),
        }
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn forecast_url_template(&self) -> &str {
        &self.forecast_url_template
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        self.cache_ttl
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn key_precision(&self) -> usize {
        self.key_precision
    }

    pub fn classification(&self) -> ClassificationMode {
        self.classification
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            forecast_url_template: DEFAULT_FORECAST_URL_TEMPLATE.to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            cache_ttl: chrono::Duration::minutes(DEFAULT_TTL_MINUTES),
            schema_version: DEFAULT_SCHEMA_VERSION,
            key_precision: DEFAULT_KEY_PRECISION,
            classification: ClassificationMode::default(),
        }
    }
}

/// Builder for [`ResolverConfig`]. Unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    pub fn url_template(mut self, template: impl Into<String>) -> Self {
        self.config.url_template = template.into();
        self
    }

    pub fn forecast_url_template(mut self, template: impl Into<String>) -> Self {
        self.config.forecast_url_template = template.into();
        self
    }

    /// Sets the API credential. An empty string means none.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.config.api_key = (!key.is_empty()).then_some(key);
        self
    }

    pub fn api_key_header(mut self, header: impl Into<String>) -> Self {
        self.config.api_key_header = header.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn cache_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.config.cache_ttl = ttl;
        self
    }

    pub fn schema_version(mut self, version: u32) -> Self {
        self.config.schema_version = version;
        self
    }

    pub fn key_precision(mut self, precision: usize) -> Self {
        self.config.key_precision = precision;
        self
    }

    pub fn classification(mut self, mode: ClassificationMode) -> Self {
        self.config.classification = mode;
        self
    }

    pub fn build(self) -> ResolverConfig {
        self.config
    }
}
