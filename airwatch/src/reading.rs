//! The computed air quality reading returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aqi::{aqi_for_concentration, epa_correct, AqiError, ClassificationMode, Tier};
use crate::coord::Coordinate;
use crate::station::{StationCandidate, StationDetails};

/// Air quality at the station nearest to a query origin.
///
/// Built fresh on every uncached resolution and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub station_id: String,
    pub station_coordinate: Coordinate,
    /// Great-circle distance from the query origin
    pub distance_km: f64,
    pub pm25_raw: f64,
    pub humidity: Option<f64>,
    pub pm25_corrected: f64,
    /// `None` when the corrected concentration is beyond the top of the index
    pub aqi: Option<u16>,
    pub tier: Tier,
    /// Pass-through fields from the data source
    pub details: StationDetails,
    pub computed_at: DateTime<Utc>,
}

impl Reading {
    /// Runs the AQI engine over a station's raw reading.
    ///
    /// When the station reports humidity the EPA correction is applied and
    /// clamped at zero; without humidity the source value is taken as
    /// already corrected.
    ///
    /// # Arguments
    ///
    /// * `station` - The chosen nearest station
    /// * `pm25` - Its raw concentration, see [`StationCandidate::concentration`]
    /// * `distance_km` - Distance from the query origin to `station`
    /// * `mode` - Scale the tier is derived from
    /// * `computed_at` - Timestamp recorded on the reading
    ///
    /// # Errors
    ///
    /// [`AqiError::InvalidConcentration`] when the raw PM2.5 is negative or
    /// not a finite number.
    pub fn compute(
        station: &StationCandidate,
        pm25: f64,
        distance_km: f64,
        mode: ClassificationMode,
        computed_at: DateTime<Utc>,
    ) -> Result<Self, AqiError> {
        let raw = &station.reading;
        if !pm25.is_finite() || pm25 < 0.0 {
            return Err(AqiError::InvalidConcentration(pm25));
        }

        let corrected = match raw.humidity {
            Some(humidity) => epa_correct(pm25, humidity).max(0.0),
            None => pm25,
        };
        let aqi = aqi_for_concentration(corrected)?;
        let tier = mode.classify(corrected, aqi)?;

        Ok(Self {
            station_id: station.id.clone(),
            station_coordinate: station.coordinate,
            distance_km,
            pm25_raw: pm25,
            humidity: raw.humidity,
            pm25_corrected: corrected,
            aqi,
            tier,
            details: raw.details.clone(),
            computed_at,
        })
    }

    /// Station display name, falling back to its id.
    pub fn station_name(&self) -> &str {
        self.details.name.as_deref().unwrap_or(&self.station_id)
    }
}
