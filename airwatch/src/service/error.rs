//! Resolution error types.

use std::fmt;

use crate::aqi::AqiError;
use crate::fetch::FetchError;
use crate::station::{PayloadError, StationError};

/// Errors that can end a resolution.
///
/// Cache failures are absent on purpose: they are absorbed as misses.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// Caller cancelled or the deadline passed
    Cancelled,
    /// Every fetch attempt failed
    Fetch(FetchError),
    /// The payload could not be turned into station candidates
    Payload(PayloadError),
    /// No station to choose from
    Station(StationError),
    /// The chosen station's reading could not be converted
    Aqi(AqiError),
    /// A station id that cannot be placed in a request URL
    InvalidStationId(String),
}

impl ResolveError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "Resolution cancelled"),
            Self::Fetch(e) => write!(f, "Data source unavailable: {}", e),
            Self::Payload(e) => write!(f, "Unusable data source response: {}", e),
            Self::Station(e) => write!(f, "Station selection failed: {}", e),
            Self::Aqi(e) => write!(f, "AQI computation failed: {}", e),
            Self::InvalidStationId(id) => write!(
                f,
                "Invalid station id '{}': use letters, digits, '-' or '_'",
                id
            ),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cancelled | Self::InvalidStationId(_) => None,
            Self::Fetch(e) => Some(e),
            Self::Payload(e) => Some(e),
            Self::Station(e) => Some(e),
            Self::Aqi(e) => Some(e),
        }
    }
}

impl From<FetchError> for ResolveError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Cancelled => Self::Cancelled,
            other => Self::Fetch(other),
        }
    }
}

impl From<PayloadError> for ResolveError {
    fn from(e: PayloadError) -> Self {
        Self::Payload(e)
    }
}

impl From<StationError> for ResolveError {
    fn from(e: StationError) -> Self {
        Self::Station(e)
    }
}

impl From<AqiError> for ResolveError {
    fn from(e: AqiError) -> Self {
        Self::Aqi(e)
    }
}
