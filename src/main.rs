use std::path::Path;
use anyhow::{Context, Result};
use chrono::Datelike;
use log::error;
use crate::cleaning::clean;
use crate::initialization::init;
use crate::loader::{load_met_data, load_power_curve};
use crate::production::WindFarmProduction;
use crate::report::Summary;
use crate::shear::derive;
use crate::statistics::{monthly_averages, overall_average};

mod cleaning;
mod config;
mod errors;
mod initialization;
mod loader;
mod models;
mod plot;
mod production;
mod report;
mod shear;
mod statistics;

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Runs the whole pipeline once: load, clean, derive, aggregate, report and plot
///
fn run() -> Result<()> {
    let config = init()?;

    let power_curve = load_power_curve(Path::new(&config.files.power_curve), &config.columns)
        .context("failed to load power curve")?;
    let readings = load_met_data(Path::new(&config.files.met_data), &config.columns)
        .context("failed to load met tower data")?;

    let derived = derive(&clean(&readings), &config.shear);

    let month = config.energy.report_month;
    let production = WindFarmProduction::new(&power_curve, &config.energy)
        .context("invalid wind speed bins")?;
    let energy_mwh = production.monthly_energy(&derived, month)
        .with_context(|| format!("failed to estimate energy production for month {}", month))?;

    let monthly = monthly_averages(&derived);
    let summary = Summary {
        hub_height: config.shear.hub_height,
        year: derived.first().map(|d| d.timestamp.year()).unwrap_or_default(),
        overall_average: overall_average(&derived),
        monthly_averages: &monthly,
        energy_month: month,
        energy_year: derived.iter()
            .find(|d| d.timestamp.month() == month)
            .map(|d| d.timestamp.year())
            .unwrap_or_default(),
        energy_mwh,
    };
    println!("{}", summary);

    if !config.files.plot_file.is_empty() {
        plot::plot_met_data(Path::new(&config.files.plot_file), &readings, &derived, &config.shear)
            .context("failed to draw chart")?;
    }

    Ok(())
}
