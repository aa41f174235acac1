//! US EPA correction for low-cost optical PM2.5 sensors.
//!
//! Piecewise in the raw concentration, with linear blends across the
//! 30–50 and 210–260 µg/m³ transitions so the curve is continuous.

const LOW_SLOPE: f64 = 0.524;
const MID_SLOPE: f64 = 0.786;
const HUMIDITY_COEFF: f64 = 0.0862;
const INTERCEPT: f64 = 5.75;

const HIGH_INTERCEPT: f64 = 2.966;
const HIGH_SLOPE: f64 = 0.69;
const HIGH_QUADRATIC: f64 = 8.84e-4;

/// Applies the EPA correction to a raw PM2.5 concentration.
///
/// | raw PM2.5     | corrected                                      |
/// |---------------|------------------------------------------------|
/// | < 30          | `0.524·pm − 0.0862·rh + 5.75`                  |
/// | [30, 50)      | blend of the two neighbours, `f = pm/20 − 1.5` |
/// | [50, 210)     | `0.786·pm − 0.0862·rh + 5.75`                  |
/// | [210, 260)    | blend of the two neighbours, `f = pm/50 − 4.2` |
/// | ≥ 260         | `2.966 + 0.69·pm + 8.84e-4·pm²`                |
///
/// The result is not clamped; very clean air at high humidity can produce
/// a negative value.
///
/// # Example
///
/// ```
/// use airwatch::aqi::epa_correct;
///
/// let corrected = epa_correct(40.0, 60.0);
/// assert!((corrected - 26.778).abs() < 1e-9);
/// ```
pub fn epa_correct(pm25: f64, humidity: f64) -> f64 {
    if pm25 < 30.0 {
        low_range(pm25, humidity)
    } else if pm25 < 50.0 {
        let f = pm25 / 20.0 - 1.5;
        (1.0 - f) * low_range(pm25, humidity) + f * mid_range(pm25, humidity)
    } else if pm25 < 210.0 {
        mid_range(pm25, humidity)
    } else if pm25 < 260.0 {
        let f = pm25 / 50.0 - 4.2;
        (1.0 - f) * mid_range(pm25, humidity) + f * high_range(pm25)
    } else {
        high_range(pm25)
    }
}

#[inline]
fn low_range(pm25: f64, humidity: f64) -> f64 {
    LOW_SLOPE * pm25 - HUMIDITY_COEFF * humidity + INTERCEPT
}

#[inline]
fn mid_range(pm25: f64, humidity: f64) -> f64 {
    MID_SLOPE * pm25 - HUMIDITY_COEFF * humidity + INTERCEPT
}

#[inline]
fn high_range(pm25: f64) -> f64 {
    HIGH_INTERCEPT + HIGH_SLOPE * pm25 + HIGH_QUADRATIC * pm25 * pm25
}
