use std::path::PathBuf;
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Error depicting errors that occur while loading and validating the configuration
///
#[derive(Debug, Error)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}

/// Error depicting errors that occur while setting up logging
///
#[derive(Debug, Error)]
#[error("LoggingError: {0}")]
pub struct LoggingError(pub String);
impl From<std::io::Error> for LoggingError {
    fn from(e: std::io::Error) -> Self { LoggingError(e.to_string()) }
}
impl From<log4rs::config::runtime::ConfigErrors> for LoggingError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self { LoggingError(e.to_string()) }
}
impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self { LoggingError(e.to_string()) }
}

/// Errors from reading the power curve and met tower files
///
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },
    #[error("unparsable value '{value}' in column '{column}' at line {line} of {path}")]
    Parse {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },
    #[error("unparsable timestamp '{value}' at line {line} of {path}")]
    Timestamp { path: PathBuf, line: u64, value: String },
    #[error("no data rows in {path}")]
    Empty { path: PathBuf },
    #[error("wind speeds in {path} are not in ascending order at line {line}")]
    Unordered { path: PathBuf, line: u64 },
}

/// Errors from the monthly energy estimate
///
#[derive(Debug, Error, PartialEq)]
pub enum EnergyError {
    #[error("month must be within 1..=12, got {0}")]
    InvalidMonth(u32),
    #[error("no readings for month {0}")]
    EmptyMonth(u32),
    #[error("no readings for month {0} fall within the wind speed bins")]
    EmptyHistogram(u32),
    #[error("bin width {width} and max wind speed {max_wind_speed} do not give a usable number of bins")]
    InvalidBins { width: f64, max_wind_speed: f64 },
    #[error("histogram has {bins} bins but the power curve has {rows} rows")]
    BinMismatch { bins: usize, rows: usize },
}

/// Error depicting errors that occur while drawing the chart
///
#[derive(Debug, Error)]
#[error("PlotError: {0}")]
pub struct PlotError(pub String);
impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self { PlotError(e.to_string()) }
}
impl From<&str> for PlotError {
    fn from(e: &str) -> Self { PlotError(e.to_string()) }
}
