use chrono::NaiveDateTime;

/// One met tower measurement as read from file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetReading {
    pub timestamp: NaiveDateTime,
    pub wind_speed_lower: f64,
    pub wind_speed_upper: f64,
    pub direction_deg: f64,
    pub temperature_c: f64,
}

/// Wind speeds kept after sensor error rows have been removed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanReading {
    pub timestamp: NaiveDateTime,
    pub wind_speed_lower: f64,
    pub wind_speed_upper: f64,
}

/// Clean reading extended with shear exponent and hub height wind speed.
///
/// 'alpha' is None where the exponent is not finite, in which case 'wind_speed_hub' is 0.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedReading {
    pub timestamp: NaiveDateTime,
    pub wind_speed_lower: f64,
    pub wind_speed_upper: f64,
    pub alpha: Option<f64>,
    pub wind_speed_hub: f64,
}

/// Mean hub height wind speed for one month name
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAverage {
    pub month: String,
    pub year: i32,
    pub mean: f64,
    pub count: usize,
}
