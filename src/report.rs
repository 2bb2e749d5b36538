use std::fmt;
use std::fmt::Formatter;
use chrono::Month;
use crate::models::met_data::MonthlyAverage;

/// Everything that goes into the printed summary
pub struct Summary<'a> {
    pub hub_height: f64,
    pub year: i32,
    pub overall_average: f64,
    pub monthly_averages: &'a [MonthlyAverage],
    pub energy_month: u32,
    pub energy_year: i32,
    pub energy_mwh: f64,
}

/// Implementation of the Display Trait for the printed report, values rounded to two decimals
impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let height = self.hub_height;

        writeln!(f, "Average {}-m wind speed in {}: {:.2} m/s\n", height, self.year, self.overall_average)?;
        for m in self.monthly_averages {
            writeln!(f, "Average {}-m wind speed in {} {}: {:.2} m/s", height, m.month, m.year, m.mean)?;
        }
        write!(f, "\n{} {} energy production estimate: {:.2} MWh",
               month_name(self.energy_month), self.energy_year, self.energy_mwh)
    }
}

/// English name of a month number, or the number itself when out of range
fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| month.to_string())
}
