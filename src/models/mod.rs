pub mod power_curve;
pub mod met_data;
