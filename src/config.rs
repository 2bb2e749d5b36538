use std::fs;
use std::path::Path;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::production::MAX_BINS;

/// Name of the optional configuration file looked for in the working directory
pub const CONFIG_FILE: &str = "windresource.toml";

#[derive(Deserialize)]
#[serde(default)]
pub struct Files {
    pub power_curve: String,
    pub met_data: String,
    pub plot_file: String,
}

impl Default for Files {
    fn default() -> Self {
        Files {
            power_curve: "PowerCurve.csv".to_string(),
            met_data: "wind.csv".to_string(),
            plot_file: "wind_resource.svg".to_string(),
        }
    }
}

/// Header names expected in the two input files
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct Columns {
    pub power_curve_speed: String,
    pub power_curve_power: String,
    pub time: String,
    pub speed_lower: String,
    pub speed_upper: String,
    pub direction: String,
    pub temperature: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            power_curve_speed: "WindSpeed.ms".to_string(),
            power_curve_power: "Power.kW".to_string(),
            time: "Time".to_string(),
            speed_lower: "WindSpeed30.ms".to_string(),
            speed_upper: "WindSpeed60.ms".to_string(),
            direction: "Dir.degree".to_string(),
            temperature: "Temp.C".to_string(),
        }
    }
}

/// Measurement and hub heights in meters
#[derive(Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ShearParameters {
    pub lower_height: f64,
    pub upper_height: f64,
    pub hub_height: f64,
}

impl Default for ShearParameters {
    fn default() -> Self {
        ShearParameters { lower_height: 30.0, upper_height: 60.0, hub_height: 80.0 }
    }
}

#[derive(Deserialize, Clone, Copy)]
#[serde(default)]
pub struct EnergyParameters {
    pub fleet_size: u32,
    pub report_month: u32,
    pub bin_width: f64,
    pub max_wind_speed: f64,
}

impl Default for EnergyParameters {
    fn default() -> Self {
        EnergyParameters { fleet_size: 10, report_month: 9, bin_width: 0.25, max_wind_speed: 30.0 }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        General { log_path: String::new(), log_level: LevelFilter::Info, log_to_stdout: false }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub files: Files,
    pub columns: Columns,
    pub shear: ShearParameters,
    pub energy: EnergyParameters,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items.
/// A missing file is not an error, built-in defaults are returned instead.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let config = if Path::new(config_path).exists() {
        let toml = fs::read_to_string(config_path)?;
        parse_config(&toml)?
    } else {
        Config::default()
    };

    validate(&config)?;

    Ok(config)
}

/// Parses a configuration document
///
/// # Arguments
///
/// * 'toml' - the TOML document
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    Ok(config)
}

/// Checks that heights, bins and report month make sense
///
/// # Arguments
///
/// * 'config' - the configuration to check
fn validate(config: &Config) -> Result<(), ConfigError> {
    let shear = &config.shear;
    if !(shear.lower_height > 0.0 && shear.lower_height < shear.upper_height) {
        return Err(ConfigError::from("shear heights must satisfy 0 < lower_height < upper_height"));
    }
    if shear.hub_height <= 0.0 {
        return Err(ConfigError::from("hub_height must be positive"));
    }

    let energy = &config.energy;
    if !(1..=12).contains(&energy.report_month) {
        return Err(ConfigError(format!("report_month must be within 1..=12, got {}", energy.report_month)));
    }
    if energy.bin_width <= 0.0 || energy.max_wind_speed <= 0.0 {
        return Err(ConfigError::from("bin_width and max_wind_speed must be positive"));
    }
    let bins = energy.max_wind_speed / energy.bin_width;
    if !(bins.is_finite() && bins < MAX_BINS as f64) {
        return Err(ConfigError(format!("max_wind_speed / bin_width must stay below {} bins, got {}", MAX_BINS, bins)));
    }

    Ok(())
}
