use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use crate::config::EnergyParameters;
use crate::errors::EnergyError;
use crate::models::met_data::DerivedReading;
use crate::models::power_curve::PowerCurve;

/// Tolerance when comparing power curve wind speeds with bin centers
const BIN_CENTER_TOLERANCE: f64 = 1e-6;

/// Upper limit on the number of wind speed bins
pub const MAX_BINS: usize = 100_000;

/// Fixed width wind speed bins centered on 0, width, 2*width, ... up to and including max wind speed.
///
/// Bins are half open, [lower, upper), except the last one which also includes its upper edge.
/// Values outside the outer edges are not counted.
#[derive(Debug, Clone, Copy)]
pub struct WindBins {
    lower: f64,
    width: f64,
    count: usize,
}

impl WindBins {
    /// Returns bins with edges from -width/2 to max_wind_speed + width/2
    ///
    /// # Arguments
    ///
    /// * 'width' - bin width in m/s
    /// * 'max_wind_speed' - center of the last bin in m/s
    pub fn new(width: f64, max_wind_speed: f64) -> Result<WindBins, EnergyError> {
        let steps = (max_wind_speed / width).round();
        if !(width > 0.0 && steps.is_finite() && steps >= 0.0 && steps < MAX_BINS as f64) {
            return Err(EnergyError::InvalidBins { width, max_wind_speed });
        }

        Ok(WindBins { lower: -width / 2.0, width, count: steps as usize + 1 })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Upper edge of the last bin
    pub fn upper(&self) -> f64 {
        self.lower + self.width * self.count as f64
    }

    /// Lower edge of the given bin
    fn edge(&self, index: usize) -> f64 {
        self.lower + self.width * index as f64
    }

    /// Wind speed at the center of the given bin
    pub fn center(&self, index: usize) -> f64 {
        self.lower + self.width * (index as f64 + 0.5)
    }

    /// Returns the index of the bin holding the given wind speed, if any
    ///
    /// # Arguments
    ///
    /// * 'wind_speed' - wind speed in m/s
    pub fn index(&self, wind_speed: f64) -> Option<usize> {
        if !(wind_speed >= self.lower && wind_speed <= self.upper()) {
            return None;
        }
        let mut index = (((wind_speed - self.lower) / self.width).floor() as usize).min(self.count - 1);

        // The division may round across an edge, so settle against the edges themselves
        if index > 0 && wind_speed < self.edge(index) {
            index -= 1;
        } else if index + 1 < self.count && wind_speed >= self.edge(index + 1) {
            index += 1;
        }

        Some(index)
    }

    /// Counts wind speeds per bin
    ///
    /// # Arguments
    ///
    /// * 'wind_speeds' - wind speeds in m/s
    pub fn histogram(&self, wind_speeds: impl Iterator<Item = f64>) -> Vec<usize> {
        let mut counts = vec![0usize; self.count];
        for index in wind_speeds.filter_map(|w| self.index(w)) {
            counts[index] += 1;
        }

        counts
    }
}

/// Estimates energy production for a fleet of identical turbines from hub height wind speeds
pub struct WindFarmProduction<'a> {
    power_curve: &'a PowerCurve,
    bins: WindBins,
    fleet_size: u32,
}

impl<'a> WindFarmProduction<'a> {
    /// Returns a new WindFarmProduction struct
    ///
    /// # Arguments
    ///
    /// * 'power_curve' - power curve with one row per wind speed bin
    /// * 'params' - fleet size and bin layout
    pub fn new(power_curve: &'a PowerCurve, params: &EnergyParameters) -> Result<WindFarmProduction<'a>, EnergyError> {
        let bins = WindBins::new(params.bin_width, params.max_wind_speed)?;

        let off_center = power_curve.entries()
            .iter()
            .enumerate()
            .filter(|(i, e)| (e.wind_speed - bins.center(*i)).abs() > BIN_CENTER_TOLERANCE)
            .count();
        if off_center > 0 {
            warn!("{} power curve rows do not sit on a wind speed bin center", off_center);
        }

        Ok(WindFarmProduction { power_curve, bins, fleet_size: params.fleet_size })
    }

    /// Estimates fleet energy production in MWh for the given month
    ///
    /// # Arguments
    ///
    /// * 'data' - derived readings
    /// * 'month' - month of year, 1-12
    pub fn monthly_energy(&self, data: &[DerivedReading], month: u32) -> Result<f64, EnergyError> {
        let turbine_kwh = self.turbine_energy_kwh(data, month)?;

        Ok(turbine_kwh * self.fleet_size as f64 / 1000.0)
    }

    /// Estimates energy production in kWh for one turbine in the given month.
    ///
    /// Hub height wind speeds for the month are binned, frequencies are scaled to expected
    /// hours per bin over the calendar month, and hours are multiplied bin by bin with the
    /// power curve output. The year for the month length is taken from the first matching reading.
    ///
    /// # Arguments
    ///
    /// * 'data' - derived readings
    /// * 'month' - month of year, 1-12
    pub fn turbine_energy_kwh(&self, data: &[DerivedReading], month: u32) -> Result<f64, EnergyError> {
        if !(1..=12).contains(&month) {
            return Err(EnergyError::InvalidMonth(month));
        }
        if self.bins.len() != self.power_curve.len() {
            return Err(EnergyError::BinMismatch { bins: self.bins.len(), rows: self.power_curve.len() });
        }

        let month_data: Vec<&DerivedReading> = data.iter().filter(|d| d.timestamp.month() == month).collect();
        let year = month_data.first().ok_or(EnergyError::EmptyMonth(month))?.timestamp.year();

        let counts = self.bins.histogram(month_data.iter().map(|d| d.wind_speed_hub));
        let total = counts.iter().sum::<usize>();
        if total == 0 {
            return Err(EnergyError::EmptyHistogram(month));
        }

        let hours = days_in_month(year, month) as f64 * 24.0;
        debug!("month {} of {}: {} readings binned over {} hours", month, year, total, hours);

        let energy = counts
            .iter()
            .map(|&c| c as f64 / total as f64 * hours)
            .zip(self.power_curve.power_kw())
            .map(|(h, p)| h * p)
            .sum::<f64>();

        Ok(energy)
    }
}

/// Returns the number of days in the given month
///
/// # Arguments
///
/// * 'year' - the year, needed for February
/// * 'month' - month of year, 1-12
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}
