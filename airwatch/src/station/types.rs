//! Station candidate types.

use crate::coord::Coordinate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pollutant payload reported by a station.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    /// PM2.5 mass concentration in µg/m³ as reported by the source;
    /// `None` for an offline sensor
    pub pm25: Option<f64>,
    /// Relative humidity in percent, when the sensor reports it
    pub humidity: Option<f64>,
    /// Display fields carried through to the final reading unchanged
    pub details: StationDetails,
}

/// Display-only station fields.
///
/// None of these participate in any computation; they are forwarded
/// verbatim so a presentation layer can show them next to the reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationDetails {
    /// Human-readable station name
    pub name: Option<String>,
    /// Source timestamp of the measurement, in whatever format the source uses
    pub last_seen: Option<String>,
    /// Distance reported by the source itself, in kilometers
    pub reported_distance_km: Option<f64>,
    /// AQI precomputed by the source
    pub source_aqi: Option<f64>,
    /// Category title precomputed by the source
    pub source_title: Option<String>,
}

/// A monitoring station that may be selected for a location.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCandidate {
    /// Source-assigned station identifier
    pub id: String,
    /// Station position
    pub coordinate: Coordinate,
    /// Latest reading reported by the station
    pub reading: RawReading,
}

impl StationCandidate {
    /// Reported PM2.5 concentration.
    ///
    /// # Errors
    ///
    /// [`PayloadError::MissingConcentration`] when the station sent none.
    pub fn concentration(&self) -> Result<f64, PayloadError> {
        self.reading
            .pm25
            .ok_or_else(|| PayloadError::MissingConcentration {
                station: self.id.clone(),
            })
    }
}

/// Errors from station selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    /// No candidates were supplied to choose from
    #[error("No candidate stations to choose from")]
    EmptyCandidateSet,
}

/// Errors from decoding a source payload into candidates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// Payload contained no station records
    #[error("Payload contains no station records")]
    Empty,

    /// Payload is not a station object or an array of station objects
    #[error("Malformed station payload: {0}")]
    Malformed(String),

    /// The selected station has no PM2.5 concentration
    #[error("Station {station} reported no PM2.5 concentration")]
    MissingConcentration { station: String },
}
