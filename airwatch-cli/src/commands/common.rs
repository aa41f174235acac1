//! Output formatting shared across CLI commands.

use airwatch::aqi::Tier;
use airwatch::reading::Reading;
use std::fmt::Write;

/// Renders an AQI value, or `>500` when beyond the top of the index.
pub fn format_aqi(aqi: Option<u16>) -> String {
    match aqi {
        Some(value) => value.to_string(),
        None => ">500".to_string(),
    }
}

/// Renders a tier label with its display colors.
pub fn format_tier(tier: Tier) -> String {
    let info = tier.info();
    format!("{} (#{} on #{})", info.label, info.text_color, info.color)
}

/// Human-readable multi-line summary of a resolved reading.
pub fn format_reading(reading: &Reading) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Station:   {} ({})", reading.station_name(), reading.station_id);
    let _ = writeln!(
        out,
        "Position:  {} ({:.2} km away)",
        reading.station_coordinate, reading.distance_km
    );
    let _ = write!(out, "PM2.5:     {:.1} µg/m³", reading.pm25_corrected);
    match reading.humidity {
        Some(humidity) => {
            let _ = writeln!(
                out,
                " (raw {:.1}, humidity {:.0}%)",
                reading.pm25_raw, humidity
            );
        }
        None => out.push('\n'),
    }
    let _ = writeln!(out, "AQI:       {}", format_aqi(reading.aqi));
    let _ = writeln!(out, "Level:     {}", format_tier(reading.tier));
    if let Some(last_seen) = &reading.details.last_seen {
        let _ = writeln!(out, "Measured:  {}", last_seen);
    }
    let _ = write!(
        out,
        "Computed:  {}",
        reading.computed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}
