//! Severity tiers and the shared threshold table.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::AqiError;

/// Air quality severity, ordered from cleanest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Display and threshold data for a single tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierInfo {
    pub tier: Tier,
    /// Human readable label
    pub label: &'static str,
    /// Background color, RGB hex without the leading `#`
    pub color: &'static str,
    /// Text color that stays legible on `color`
    pub text_color: &'static str,
    /// Lowest AQI value that belongs to this tier
    pub aqi_floor: u16,
    /// Lowest PM2.5 concentration (µg/m³) that belongs to this tier
    pub pm25_floor: f64,
}

/// Tier table in ascending order. Both classification modes read from it.
pub static TIERS: [TierInfo; 6] = [
    TierInfo {
        tier: Tier::Good,
        label: "Good",
        color: "3EC562",
        text_color: "000000",
        aqi_floor: 0,
        pm25_floor: 0.0,
    },
    TierInfo {
        tier: Tier::Moderate,
        label: "Moderate",
        color: "FDD74B",
        text_color: "000000",
        aqi_floor: 50,
        pm25_floor: 15.1,
    },
    TierInfo {
        tier: Tier::UnhealthySensitive,
        label: "Unhealthy for Sensitive Groups",
        color: "FB9B57",
        text_color: "000000",
        aqi_floor: 100,
        pm25_floor: 25.1,
    },
    TierInfo {
        tier: Tier::Unhealthy,
        label: "Unhealthy",
        color: "F65E5E",
        text_color: "FFFFFF",
        aqi_floor: 150,
        pm25_floor: 37.6,
    },
    TierInfo {
        tier: Tier::VeryUnhealthy,
        label: "Very Unhealthy",
        color: "A070B6",
        text_color: "FFFFFF",
        aqi_floor: 200,
        pm25_floor: 75.1,
    },
    TierInfo {
        tier: Tier::Hazardous,
        label: "Hazardous",
        color: "7D1A1A",
        text_color: "FFFFFF",
        aqi_floor: 300,
        pm25_floor: 250.5,
    },
];

impl Tier {
    /// Returns the table row for this tier.
    pub fn info(self) -> &'static TierInfo {
        &TIERS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn color(self) -> &'static str {
        self.info().color
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies an AQI value.
///
/// A value equal to a tier's floor belongs to that tier.
pub fn classify_aqi(aqi: u16) -> Tier {
    TIERS
        .iter()
        .rev()
        .find(|row| aqi >= row.aqi_floor)
        .map_or(Tier::Good, |row| row.tier)
}

/// Classifies a PM2.5 concentration (µg/m³) directly, without going
/// through the AQI scale.
///
/// # Errors
///
/// [`AqiError::InvalidConcentration`] for negative or non-finite input.
pub fn classify_concentration(pm25: f64) -> Result<Tier, AqiError> {
    if !pm25.is_finite() || pm25 < 0.0 {
        return Err(AqiError::InvalidConcentration(pm25));
    }
    Ok(TIERS
        .iter()
        .rev()
        .find(|row| pm25 >= row.pm25_floor)
        .map_or(Tier::Good, |row| row.tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table_is_indexed_by_tier() {
        for (index, row) in TIERS.iter().enumerate() {
            assert_eq!(row.tier as usize, index);
            assert_eq!(row.tier.info(), row);
        }
    }

    #[test]
    fn test_table_floors_ascend() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].aqi_floor < pair[1].aqi_floor);
            assert!(pair[0].pm25_floor < pair[1].pm25_floor);
            assert!(pair[0].tier < pair[1].tier);
        }
    }

    #[test]
    fn test_classify_aqi_thresholds_go_up() {
        assert_eq!(classify_aqi(0), Tier::Good);
        assert_eq!(classify_aqi(49), Tier::Good);
        assert_eq!(classify_aqi(50), Tier::Moderate);
        assert_eq!(classify_aqi(99), Tier::Moderate);
        assert_eq!(classify_aqi(100), Tier::UnhealthySensitive);
        assert_eq!(classify_aqi(150), Tier::Unhealthy);
        assert_eq!(classify_aqi(200), Tier::VeryUnhealthy);
        assert_eq!(classify_aqi(299), Tier::VeryUnhealthy);
        assert_eq!(classify_aqi(300), Tier::Hazardous);
        assert_eq!(classify_aqi(500), Tier::Hazardous);
    }

    #[test]
    fn test_classify_concentration_thresholds_go_up() {
        let c = |v| classify_concentration(v).unwrap();
        assert_eq!(c(0.0), Tier::Good);
        assert_eq!(c(15.0), Tier::Good);
        assert_eq!(c(15.1), Tier::Moderate);
        assert_eq!(c(25.1), Tier::UnhealthySensitive);
        assert_eq!(c(26.778), Tier::UnhealthySensitive);
        assert_eq!(c(37.6), Tier::Unhealthy);
        assert_eq!(c(75.1), Tier::VeryUnhealthy);
        assert_eq!(c(250.5), Tier::Hazardous);
        assert_eq!(c(900.0), Tier::Hazardous);
    }

    #[test]
    fn test_classify_concentration_rejects_negative() {
        assert!(classify_concentration(-1.0).is_err());
        assert!(classify_concentration(f64::INFINITY).is_err());
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(
            Tier::UnhealthySensitive.to_string(),
            "Unhealthy for Sensitive Groups"
        );
        assert_eq!(Tier::Hazardous.color(), "7D1A1A");
    }

    proptest! {
        /// Property: exactly one tier's AQI range holds each value.
        #[test]
        fn prop_aqi_partition(aqi in 0u16..=500u16) {
            let tier = classify_aqi(aqi);
            let matching: Vec<_> = TIERS
                .iter()
                .enumerate()
                .filter(|(i, row)| {
                    let upper = TIERS.get(i + 1).map_or(u16::MAX, |next| next.aqi_floor);
                    aqi >= row.aqi_floor && aqi < upper
                })
                .collect();
            prop_assert_eq!(matching.len(), 1);
            prop_assert_eq!(matching[0].1.tier, tier);
        }

        /// Property: concentration classification never regresses.
        #[test]
        fn prop_concentration_monotonic(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify_concentration(lo).unwrap() <= classify_concentration(hi).unwrap());
        }
    }
}
