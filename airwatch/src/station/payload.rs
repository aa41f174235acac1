//! Decoding of source payloads into station candidates.
//!
//! Sources disagree on field names and on whether numbers are sent as JSON
//! numbers or strings. Each record is decoded leniently: unknown fields are
//! ignored, numeric fields accept either representation, and vendor-specific
//! names are resolved in a fixed precedence order.
//!
//! Accepted payload shapes:
//!
//! - an array of station objects (proximity APIs, nearest first)
//! - a single station object
//! - `{"sensor": {...}}` (single-sensor APIs)
//! - `{"data": [{...}, ...]}`
//! - `{"fields": ["name", ...], "data": [[...], ...]}` (sensor list APIs)

use super::types::{PayloadError, RawReading, StationCandidate, StationDetails};
use crate::coord::Coordinate;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::warn;

/// One station record as it appears on the wire.
#[derive(Debug, Default, Deserialize)]
struct StationRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    dustboy_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    sensor_index: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    dustboy_name_en: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    dustboy_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    dustboy_lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    dustboy_lng: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pm25: Option<f64>,
    #[serde(default, rename = "pm2.5_cf_1", deserialize_with = "lenient_f64")]
    pm25_cf_1: Option<f64>,
    #[serde(default, rename = "pm2.5", deserialize_with = "lenient_f64")]
    pm25_dotted: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    humidity: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    us_aqi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    us_title_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    last_seen: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    log_datetime: Option<String>,
}

impl StationRecord {
    /// Returns `None` for a record without a usable position.
    fn into_candidate(self, index: usize) -> Option<StationCandidate> {
        let name = self.dustboy_name_en.or(self.name);
        let id = self
            .dustboy_id
            .or(self.id)
            .or(self.sensor_index)
            .or_else(|| name.clone())
            .unwrap_or_else(|| format!("station-{}", index));

        let latitude = self.dustboy_lat.or(self.latitude);
        let longitude = self.dustboy_lon.or(self.dustboy_lng).or(self.longitude);
        let coordinate = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
            _ => {
                warn!(station = %id, record = index, "Skipping station without coordinates");
                return None;
            }
        };

        Some(StationCandidate {
            id,
            coordinate,
            reading: RawReading {
                pm25: self.pm25.or(self.pm25_cf_1).or(self.pm25_dotted),
                humidity: self.humidity,
                details: StationDetails {
                    name,
                    last_seen: self.last_seen.or(self.log_datetime),
                    reported_distance_km: self.distance,
                    source_aqi: self.us_aqi,
                    source_title: self.us_title_en,
                },
            },
        })
    }
}

/// Decodes a source payload into station candidates, preserving source order.
///
/// Records without coordinates are skipped. Records without a PM2.5 value
/// are kept so that an offline station far away never blocks the nearest
/// one; see [`StationCandidate::concentration`].
///
/// # Errors
///
/// - [`PayloadError::Empty`] if no record with a position remains
/// - [`PayloadError::Malformed`] if it is neither an object nor an array of objects
pub fn parse_candidates(payload: &Value) -> Result<Vec<StationCandidate>, PayloadError> {
    let records: Vec<Cow<'_, Value>> = match payload {
        Value::Array(items) => items.iter().map(Cow::Borrowed).collect(),
        Value::Object(map) => match (map.get("sensor"), map.get("fields"), map.get("data")) {
            (Some(sensor @ Value::Object(_)), _, _) => vec![Cow::Borrowed(sensor)],
            (_, Some(Value::Array(fields)), Some(Value::Array(rows))) => {
                zip_rows(fields, rows)?
            }
            (_, _, Some(Value::Array(items))) => items.iter().map(Cow::Borrowed).collect(),
            _ => vec![Cow::Borrowed(payload)],
        },
        other => {
            return Err(PayloadError::Malformed(format!(
                "expected an object or array, got {}",
                json_kind(other)
            )))
        }
    };

    let mut candidates = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if !record.is_object() {
            return Err(PayloadError::Malformed(format!(
                "record {} is {}, expected an object",
                index,
                json_kind(record)
            )));
        }
        let record = StationRecord::deserialize(&**record)
            .map_err(|e| PayloadError::Malformed(e.to_string()))?;
        if let Some(candidate) = record.into_candidate(index) {
            candidates.push(candidate);
        }
    }

    if candidates.is_empty() {
        return Err(PayloadError::Empty);
    }
    Ok(candidates)
}

/// Turns column-oriented rows into one object per row.
///
/// `{"fields": ["a", "b"], "data": [[1, 2]]}` becomes `[{"a": 1, "b": 2}]`.
/// Rows that are already objects pass through unchanged.
fn zip_rows<'a>(
    fields: &[Value],
    rows: &'a [Value],
) -> Result<Vec<Cow<'a, Value>>, PayloadError> {
    let names = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            field.as_str().ok_or_else(|| {
                PayloadError::Malformed(format!(
                    "field {} is {}, expected a string",
                    i,
                    json_kind(field)
                ))
            })
        })
        .collect::<Result<Vec<&str>, _>>()?;

    Ok(rows
        .iter()
        .map(|row| match row {
            Value::Array(values) => Cow::Owned(Value::Object(
                names
                    .iter()
                    .zip(values)
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect::<Map<String, Value>>(),
            )),
            other => Cow::Borrowed(other),
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accepts a JSON number or a numeric string; anything else becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

/// Accepts a JSON string or number; empty strings become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
