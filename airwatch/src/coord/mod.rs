//! Geographic coordinate math.
//!
//! Provides the [`Coordinate`] value type and great-circle distances
//! between coordinates using the haversine formula.

mod types;

pub use types::{CoordError, Coordinate, EARTH_RADIUS_KM};

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Calculates the great-circle distance between two coordinates.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
/// Identical coordinates yield exactly `0.0`.
///
/// # Example
///
/// ```
/// use airwatch::coord::{distance_km, Coordinate};
///
/// let equator = Coordinate::new(0.0, 0.0);
/// let north = Coordinate::new(1.0, 0.0);
/// assert!((distance_km(equator, north) - 111.19).abs() < 0.01);
/// ```
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.latitude * DEG_TO_RAD;
    let lat2_rad = b.latitude * DEG_TO_RAD;
    let delta_lat = (b.latitude - a.latitude) * DEG_TO_RAD;
    let delta_lon = (b.longitude - a.longitude) * DEG_TO_RAD;

    // Haversine formula
    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
