use crate::config::ShearParameters;
use crate::models::met_data::{CleanReading, DerivedReading};

/// Calculates the wind shear exponent from the power law wind profile.
/// Returns None when the exponent is not finite, e.g. when the upper speed is zero.
///
/// # Arguments
///
/// * 'lower' - wind speed at the lower measurement height
/// * 'upper' - wind speed at the upper measurement height
/// * 'heights' - measurement and hub heights
pub fn shear_exponent(lower: f64, upper: f64, heights: &ShearParameters) -> Option<f64> {
    let alpha = (upper.ln() - lower.ln()) / (heights.upper_height.ln() - heights.lower_height.ln());

    alpha.is_finite().then_some(alpha)
}

/// Extrapolates the upper wind speed to hub height. An undefined exponent gives zero wind.
///
/// # Arguments
///
/// * 'upper' - wind speed at the upper measurement height
/// * 'alpha' - shear exponent
/// * 'heights' - measurement and hub heights
pub fn extrapolate(upper: f64, alpha: Option<f64>, heights: &ShearParameters) -> f64 {
    match alpha {
        Some(a) => upper * (heights.hub_height / heights.upper_height).powf(a),
        None => 0.0,
    }
}

/// Derives shear exponent and hub height wind speed for each cleaned reading
///
/// # Arguments
///
/// * 'readings' - cleaned readings
/// * 'heights' - measurement and hub heights
pub fn derive(readings: &[CleanReading], heights: &ShearParameters) -> Vec<DerivedReading> {
    readings
        .iter()
        .map(|r| {
            let alpha = shear_exponent(r.wind_speed_lower, r.wind_speed_upper, heights);
            DerivedReading {
                timestamp: r.timestamp,
                wind_speed_lower: r.wind_speed_lower,
                wind_speed_upper: r.wind_speed_upper,
                alpha,
                wind_speed_hub: extrapolate(r.wind_speed_upper, alpha, heights),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn clean_reading(lower: f64, upper: f64) -> CleanReading {
        CleanReading {
            timestamp: NaiveDate::from_ymd_opt(2011, 5, 5).unwrap().and_hms_opt(12, 0, 0).unwrap(),
            wind_speed_lower: lower,
            wind_speed_upper: upper,
        }
    }

    #[test]
    fn zero_upper_speed_gives_zero_hub_speed() {
        let heights = ShearParameters::default();
        let derived = derive(&[clean_reading(0.0, 0.0), clean_reading(3.2, 0.0)], &heights);
        for d in derived {
            assert!(d.alpha.is_none());
            assert_eq!(d.wind_speed_hub, 0.0);
        }
    }

    #[test]
    fn zero_lower_speed_gives_zero_hub_speed() {
        let derived = derive(&[clean_reading(0.0, 4.0)], &ShearParameters::default());
        assert!(derived[0].alpha.is_none());
        assert_eq!(derived[0].wind_speed_hub, 0.0);
    }

    #[test]
    fn equal_speeds_mean_no_shear() {
        let derived = derive(&[clean_reading(6.5, 6.5)], &ShearParameters::default());
        assert_eq!(derived[0].alpha, Some(0.0));
        assert_eq!(derived[0].wind_speed_hub, 6.5);
    }

    #[test]
    fn doubling_speed_over_doubled_height_gives_unit_exponent() {
        let heights = ShearParameters::default();
        let alpha = shear_exponent(4.0, 8.0, &heights).unwrap();
        assert_relative_eq!(alpha, 1.0, epsilon = 1e-12);
        assert_relative_eq!(extrapolate(8.0, Some(alpha), &heights), 8.0 * 80.0 / 60.0, epsilon = 1e-12);
    }

    #[test]
    fn typical_shear_increases_speed_with_height() {
        let heights = ShearParameters::default();
        let alpha = shear_exponent(5.0, 5.6, &heights).unwrap();
        let expected = (5.6f64.ln() - 5.0f64.ln()) / (60.0f64.ln() - 30.0f64.ln());
        assert_relative_eq!(alpha, expected, epsilon = 1e-12);
        let hub = extrapolate(5.6, Some(alpha), &heights);
        assert!(hub > 5.6);
        assert_relative_eq!(hub, 5.6 * (80.0f64 / 60.0).powf(expected), epsilon = 1e-12);
    }
}
