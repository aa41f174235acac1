//! Compute command - run the AQI engine on a single measurement offline.

use airwatch::aqi::{aqi_for_concentration, epa_correct, AqiError, ClassificationMode, Tier};
use airwatch::config::ConfigFile;
use std::path::Path;

use super::common::{format_aqi, format_tier};
use crate::error::CliError;

/// Arguments for the compute command.
pub struct ComputeArgs {
    pub pm25: f64,
    pub humidity: Option<f64>,
    /// Overrides the `[aqi] classification` config value
    pub classification: Option<ClassificationMode>,
    pub json: bool,
}

/// Result of running one measurement through the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    pub pm25_raw: f64,
    pub humidity: Option<f64>,
    pub pm25_corrected: f64,
    pub aqi: Option<u16>,
    pub tier: Tier,
    pub mode: ClassificationMode,
}

impl Computation {
    /// Applies the same steps a resolved reading goes through.
    pub fn evaluate(
        pm25: f64,
        humidity: Option<f64>,
        mode: ClassificationMode,
    ) -> Result<Self, AqiError> {
        if !pm25.is_finite() || pm25 < 0.0 {
            return Err(AqiError::InvalidConcentration(pm25));
        }
        let corrected = match humidity {
            Some(h) => epa_correct(pm25, h).max(0.0),
            None => pm25,
        };
        let aqi = aqi_for_concentration(corrected)?;
        let tier = mode.classify(corrected, aqi)?;

        Ok(Self {
            pm25_raw: pm25,
            humidity,
            pm25_corrected: corrected,
            aqi,
            tier,
            mode,
        })
    }

    fn to_json(&self) -> serde_json::Value {
        let info = self.tier.info();
        serde_json::json!({
            "pm25_raw": self.pm25_raw,
            "humidity": self.humidity,
            "pm25_corrected": self.pm25_corrected,
            "aqi": self.aqi,
            "tier": info.label,
            "color": info.color,
            "text_color": info.text_color,
            "classification": self.mode.to_string(),
        })
    }
}

/// Run the compute command.
pub fn run(args: ComputeArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let mode = match args.classification {
        Some(mode) => mode,
        None => match config_path {
            Some(path) => ConfigFile::load_from(path)?.aqi.classification,
            None => ConfigFile::load()?.aqi.classification,
        },
    };

    let computation = Computation::evaluate(args.pm25, args.humidity, mode)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&computation.to_json())?);
        return Ok(());
    }

    match computation.humidity {
        Some(h) => println!(
            "PM2.5: {:.1} µg/m³ (raw {:.1}, humidity {:.0}%)",
            computation.pm25_corrected, computation.pm25_raw, h
        ),
        None => println!("PM2.5: {:.1} µg/m³", computation.pm25_corrected),
    }
    println!("AQI:   {}", format_aqi(computation.aqi));
    println!(
        "Level: {} [by {}]",
        format_tier(computation.tier),
        computation.mode
    );

    Ok(())
}
