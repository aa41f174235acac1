//! Air quality resolution service.
//!
//! [`AirQualityResolver`] ties the cache, fetcher, station selection and
//! AQI engine together behind a single `resolve` call, and fetches raw
//! station forecasts through the same retrying transport.

mod config;
mod error;
mod resolver;

pub use config::{
    ResolverConfig, ResolverConfigBuilder, DEFAULT_API_KEY_HEADER, DEFAULT_FORECAST_URL_TEMPLATE,
    DEFAULT_SCHEMA_VERSION, DEFAULT_URL_TEMPLATE,
};
pub use error::ResolveError;
pub use resolver::AirQualityResolver;
