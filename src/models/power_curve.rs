/// One row of a turbine power curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerCurveEntry {
    pub wind_speed: f64,
    pub power_kw: f64,
}

/// Turbine power curve ordered by wind speed
#[derive(Debug, Clone)]
pub struct PowerCurve {
    entries: Vec<PowerCurveEntry>,
}

impl PowerCurve {
    /// Returns a new power curve. Ordering is checked by the loader.
    ///
    /// # Arguments
    ///
    /// * 'entries' - power curve rows in ascending wind speed order
    pub fn new(entries: Vec<PowerCurveEntry>) -> PowerCurve {
        PowerCurve { entries }
    }

    pub fn entries(&self) -> &[PowerCurveEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Power output column in kW, in wind speed order
    pub fn power_kw(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.power_kw)
    }
}
