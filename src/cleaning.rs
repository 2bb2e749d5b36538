use log::info;
use crate::models::met_data::{CleanReading, MetReading};

/// Removes sensor error rows, i.e. rows where the upper wind speed is negative (or NaN),
/// and keeps only the time stamp and the two measured wind speeds. Order is preserved.
///
/// # Arguments
///
/// * 'readings' - met tower readings as loaded
pub fn clean(readings: &[MetReading]) -> Vec<CleanReading> {
    let cleaned: Vec<CleanReading> = readings
        .iter()
        .filter(|r| r.wind_speed_upper >= 0.0)
        .map(|r| CleanReading {
            timestamp: r.timestamp,
            wind_speed_lower: r.wind_speed_lower,
            wind_speed_upper: r.wind_speed_upper,
        })
        .collect();

    info!("removed {} of {} readings with bad upper wind speed", readings.len() - cleaned.len(), readings.len());

    cleaned
}
