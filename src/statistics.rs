use chrono::Datelike;
use crate::models::met_data::{DerivedReading, MonthlyAverage};

/// Returns the mean hub height wind speed over all readings (NaN if there are none)
///
/// # Arguments
///
/// * 'data' - derived readings
pub fn overall_average(data: &[DerivedReading]) -> f64 {
    data.iter().map(|d| d.wind_speed_hub).sum::<f64>() / data.len() as f64
}

/// Returns the mean hub height wind speed per month name.
///
/// Months are keyed on name only, so the same month in different years is one group,
/// and they come out in the order they first appear in the data rather than calendar order.
///
/// # Arguments
///
/// * 'data' - derived readings
pub fn monthly_averages(data: &[DerivedReading]) -> Vec<MonthlyAverage> {
    let mut sums: Vec<(String, i32, f64, usize)> = Vec::new();

    for d in data {
        let month = d.timestamp.format("%B").to_string();
        match sums.iter_mut().find(|(m, _, _, _)| *m == month) {
            Some((_, _, sum, count)) => {
                *sum += d.wind_speed_hub;
                *count += 1;
            }
            None => sums.push((month, d.timestamp.year(), d.wind_speed_hub, 1)),
        }
    }

    sums.into_iter()
        .map(|(month, year, sum, count)| MonthlyAverage { month, year, mean: sum / count as f64, count })
        .collect()
}
