//! PM2.5 to AQI conversion.
//!
//! Three pure stages: sensor correction ([`epa_correct`]), breakpoint
//! interpolation ([`aqi_for_concentration`]) and tier classification
//! ([`classify_aqi`] or [`classify_concentration`]).

mod breakpoints;
mod correction;
mod tier;

pub use breakpoints::{aqi_for_concentration, MAX_AQI, MAX_CONCENTRATION};
pub use correction::epa_correct;
pub use tier::{classify_aqi, classify_concentration, Tier, TierInfo, TIERS};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from the AQI engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AqiError {
    #[error("Invalid PM2.5 concentration: {0}")]
    InvalidConcentration(f64),
}

/// Which scale a reading is classified on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMode {
    /// Classify by the computed AQI value
    #[default]
    Aqi,
    /// Classify by corrected PM2.5 concentration
    Concentration,
}

impl ClassificationMode {
    /// Classifies a corrected concentration and its AQI under this mode.
    ///
    /// An undefined AQI (beyond the top of the index) is Hazardous.
    pub fn classify(self, pm25: f64, aqi: Option<u16>) -> Result<Tier, AqiError> {
        match self {
            ClassificationMode::Aqi => Ok(aqi.map_or(Tier::Hazardous, classify_aqi)),
            ClassificationMode::Concentration => classify_concentration(pm25),
        }
    }
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationMode::Aqi => f.write_str("aqi"),
            ClassificationMode::Concentration => f.write_str("concentration"),
        }
    }
}

impl FromStr for ClassificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aqi" => Ok(ClassificationMode::Aqi),
            "concentration" | "pm25" => Ok(ClassificationMode::Concentration),
            other => Err(format!(
                "unknown classification '{}', expected 'aqi' or 'concentration'",
                other
            )),
        }
    }
}
