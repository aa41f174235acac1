//! AQI breakpoint interpolation for PM2.5.

use super::AqiError;

/// Highest AQI value on the index.
pub const MAX_AQI: u16 = 500;

/// Highest concentration covered by the breakpoint table (µg/m³).
pub const MAX_CONCENTRATION: f64 = 500.0;

/// One row of the PM2.5 breakpoint table.
#[derive(Debug, Clone, Copy)]
struct Breakpoint {
    /// Row applies to concentrations strictly above this value
    above: f64,
    aqi_high: f64,
    aqi_low: f64,
    conc_high: f64,
    conc_low: f64,
}

/// PM2.5 breakpoints, evaluated top row first.
const BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint { above: 350.5, aqi_high: 500.0, aqi_low: 401.0, conc_high: 500.0, conc_low: 350.5 },
    Breakpoint { above: 250.5, aqi_high: 400.0, aqi_low: 301.0, conc_high: 350.4, conc_low: 250.5 },
    Breakpoint { above: 150.5, aqi_high: 300.0, aqi_low: 201.0, conc_high: 250.4, conc_low: 150.5 },
    Breakpoint { above: 55.5, aqi_high: 200.0, aqi_low: 151.0, conc_high: 150.4, conc_low: 55.5 },
    Breakpoint { above: 35.5, aqi_high: 150.0, aqi_low: 101.0, conc_high: 55.4, conc_low: 35.5 },
    Breakpoint { above: 12.1, aqi_high: 100.0, aqi_low: 51.0, conc_high: 35.4, conc_low: 12.1 },
];

/// Bottom row, which includes zero.
const BASE_ROW: Breakpoint = Breakpoint {
    above: 0.0,
    aqi_high: 50.0,
    aqi_low: 0.0,
    conc_high: 12.0,
    conc_low: 0.0,
};

/// Converts a PM2.5 concentration (µg/m³) into an AQI value.
///
/// Returns `Ok(None)` for concentrations above 500 µg/m³, which lie beyond
/// the top of the index.
///
/// # Errors
///
/// [`AqiError::InvalidConcentration`] for negative or non-finite input.
///
/// # Example
///
/// ```
/// use airwatch::aqi::aqi_for_concentration;
///
/// assert_eq!(aqi_for_concentration(12.0).unwrap(), Some(50));
/// assert_eq!(aqi_for_concentration(600.0).unwrap(), None);
/// ```
pub fn aqi_for_concentration(concentration: f64) -> Result<Option<u16>, AqiError> {
    if !concentration.is_finite() || concentration < 0.0 {
        return Err(AqiError::InvalidConcentration(concentration));
    }

    if concentration > MAX_CONCENTRATION {
        return Ok(None);
    }

    let row = BREAKPOINTS
        .iter()
        .find(|row| concentration > row.above)
        .unwrap_or(&BASE_ROW);

    let aqi = interpolate(concentration, row).clamp(0.0, f64::from(MAX_AQI));
    Ok(Some(aqi as u16))
}

#[inline]
fn interpolate(concentration: f64, row: &Breakpoint) -> f64 {
    ((row.aqi_high - row.aqi_low) / (row.conc_high - row.conc_low)
        * (concentration - row.conc_low)
        + row.aqi_low)
        .round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aqi(c: f64) -> u16 {
        aqi_for_concentration(c).unwrap().unwrap()
    }

    #[test]
    fn test_zero() {
        assert_eq!(aqi(0.0), 0);
    }

    #[test]
    fn test_row_upper_bounds() {
        assert_eq!(aqi(12.0), 50);
        // 35.4 is below the 35.5 row cut, so it tops out the 51-100 row
        assert_eq!(aqi(35.4), 100);
        assert_eq!(aqi(55.4), 150);
        assert_eq!(aqi(150.4), 200);
        assert_eq!(aqi(250.4), 300);
        assert_eq!(aqi(350.4), 400);
        assert_eq!(aqi(500.0), 500);
    }

    #[test]
    fn test_row_entry_points() {
        // Just past each cut lands at the row's low AQI
        assert_eq!(aqi(12.11), 51);
        assert_eq!(aqi(35.51), 101);
        assert_eq!(aqi(55.51), 151);
        assert_eq!(aqi(150.51), 201);
        assert_eq!(aqi(250.51), 301);
        assert_eq!(aqi(350.51), 401);
    }

    #[test]
    fn test_cut_value_belongs_to_lower_row() {
        // Rows use strict `>`, so the cut value itself stays in the row below
        assert_eq!(aqi(35.5), 100);
        assert_eq!(aqi(12.1), 50);
    }

    #[test]
    fn test_interior_value() {
        // (49 / 23.3) * (26.778 - 12.1) + 51 = 81.87
        assert_eq!(aqi(26.778), 82);
    }

    #[test]
    fn test_beyond_index_is_undefined() {
        assert_eq!(aqi_for_concentration(500.5).unwrap(), None);
        assert_eq!(aqi_for_concentration(1200.0).unwrap(), None);
    }

    #[test]
    fn test_negative_is_invalid() {
        assert!(matches!(
            aqi_for_concentration(-0.1),
            Err(AqiError::InvalidConcentration(_))
        ));
        assert!(matches!(
            aqi_for_concentration(f64::NAN),
            Err(AqiError::InvalidConcentration(_))
        ));
    }

    proptest! {
        /// Property: AQI never decreases as concentration rises.
        #[test]
        fn prop_monotonic(a in 0.0f64..500.0f64, b in 0.0f64..500.0f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(aqi(lo) <= aqi(hi));
        }

        /// Property: defined values stay within the index.
        #[test]
        fn prop_within_index(c in 0.0f64..2000.0f64) {
            if let Some(value) = aqi_for_concentration(c).unwrap() {
                prop_assert!(value <= MAX_AQI);
            }
        }
    }
}
