//! Coordinate type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean Earth radius used for great-circle distances, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in decimal degrees (WGS84 assumed, not validated).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lon"` (whitespace around either part is ignored).
impl FromStr for Coordinate {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoordError::Parse(s.to_string()))?;

        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordError::Parse(s.to_string()))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordError::Parse(s.to_string()))?;

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordError::Parse(s.to_string()));
        }

        Ok(Self::new(latitude, longitude))
    }
}

/// Errors that can occur when building coordinates from text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordError {
    /// Input is not a `lat,lon` pair of finite numbers
    #[error("Invalid coordinate '{0}' (expected 'LAT,LON' in decimal degrees)")]
    Parse(String),
}
