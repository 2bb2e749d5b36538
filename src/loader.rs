use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use crate::config::Columns;
use crate::errors::LoadError;
use crate::models::met_data::MetReading;
use crate::models::power_curve::{PowerCurve, PowerCurveEntry};

/// Timestamp layouts accepted in the met tower file, tried in order
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date only layout, read as midnight
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads the turbine power curve from a CSV file
///
/// # Arguments
///
/// * 'path' - path to the power curve file
/// * 'columns' - expected header names
pub fn load_power_curve(path: &Path, columns: &Columns) -> Result<PowerCurve, LoadError> {
    let file = open(path)?;
    let power_curve = read_power_curve(file, path, columns)?;
    info!("loaded power curve with {} rows from {}", power_curve.len(), path.display());

    Ok(power_curve)
}

/// Loads met tower readings from a CSV file
///
/// # Arguments
///
/// * 'path' - path to the met tower file
/// * 'columns' - expected header names
pub fn load_met_data(path: &Path, columns: &Columns) -> Result<Vec<MetReading>, LoadError> {
    let file = open(path)?;
    let readings = read_met_data(file, path, columns)?;
    info!("loaded {} met tower readings from {}", readings.len(), path.display());

    Ok(readings)
}

/// Reads a power curve, checking that wind speeds are non-decreasing
///
/// # Arguments
///
/// * 'reader' - source of CSV text
/// * 'path' - path used in error messages
/// * 'columns' - expected header names
pub fn read_power_curve<R: Read>(reader: R, path: &Path, columns: &Columns) -> Result<PowerCurve, LoadError> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = read_headers(&mut reader, path)?;
    let speed_idx = column_index(&headers, &columns.power_curve_speed, path)?;
    let power_idx = column_index(&headers, &columns.power_curve_power, path)?;

    let mut entries: Vec<PowerCurveEntry> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv { path: path.to_path_buf(), source: e })?;
        let line = line_of(&record);

        let wind_speed = parse_f64(&record, speed_idx, &columns.power_curve_speed, line, path)?;
        let power_kw = parse_f64(&record, power_idx, &columns.power_curve_power, line, path)?;

        if entries.last().is_some_and(|e| wind_speed < e.wind_speed) {
            return Err(LoadError::Unordered { path: path.to_path_buf(), line });
        }
        entries.push(PowerCurveEntry { wind_speed, power_kw });
    }

    if entries.is_empty() {
        return Err(LoadError::Empty { path: path.to_path_buf() });
    }

    Ok(PowerCurve::new(entries))
}

/// Reads met tower readings in file order
///
/// # Arguments
///
/// * 'reader' - source of CSV text
/// * 'path' - path used in error messages
/// * 'columns' - expected header names
pub fn read_met_data<R: Read>(reader: R, path: &Path, columns: &Columns) -> Result<Vec<MetReading>, LoadError> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = read_headers(&mut reader, path)?;
    let time_idx = column_index(&headers, &columns.time, path)?;
    let lower_idx = column_index(&headers, &columns.speed_lower, path)?;
    let upper_idx = column_index(&headers, &columns.speed_upper, path)?;
    let direction_idx = column_index(&headers, &columns.direction, path)?;
    let temperature_idx = column_index(&headers, &columns.temperature, path)?;

    let mut readings: Vec<MetReading> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv { path: path.to_path_buf(), source: e })?;
        let line = line_of(&record);

        let raw_time = record.get(time_idx).unwrap_or_default();
        let timestamp = parse_timestamp(raw_time).ok_or_else(|| LoadError::Timestamp {
            path: path.to_path_buf(),
            line,
            value: raw_time.to_string(),
        })?;

        readings.push(MetReading {
            timestamp,
            wind_speed_lower: parse_f64(&record, lower_idx, &columns.speed_lower, line, path)?,
            wind_speed_upper: parse_f64(&record, upper_idx, &columns.speed_upper, line, path)?,
            direction_deg: parse_f64(&record, direction_idx, &columns.direction, line, path)?,
            temperature_c: parse_f64(&record, temperature_idx, &columns.temperature, line, path)?,
        });
    }
    debug!("read {} rows from {}", readings.len(), path.display());

    Ok(readings)
}

/// Parses a timestamp in any of the accepted layouts
///
/// # Arguments
///
/// * 'value' - the raw cell text
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| LoadError::Io { path: path.to_path_buf(), source: e })
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>, path: &Path) -> Result<HashMap<String, usize>, LoadError> {
    let headers = reader
        .headers()
        .map_err(|e| LoadError::Csv { path: path.to_path_buf(), source: e })?;

    Ok(headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect())
}

fn column_index(headers: &HashMap<String, usize>, column: &str, path: &Path) -> Result<usize, LoadError> {
    headers.get(column).copied().ok_or_else(|| LoadError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_f64(record: &StringRecord, idx: usize, column: &str, line: u64, path: &Path) -> Result<f64, LoadError> {
    let value = record.get(idx).unwrap_or_default();
    value.parse::<f64>().map_err(|_| LoadError::Parse {
        path: path.to_path_buf(),
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use chrono::{Datelike, Timelike};

    const MET_CSV: &str = "\
Time,WindSpeed30.ms,WindSpeed60.ms,Dir.degree,Temp.C
2011-01-01 00:00:00,5.2,6.1,270,-3.5
2011-01-01 00:10:00,4.8,-999,265,-3.6
2011-01-01 00:20:00,0,0,260,-3.4
";

    fn path() -> &'static Path {
        Path::new("test.csv")
    }

    #[test]
    fn reads_met_rows_in_order() {
        let readings = read_met_data(MET_CSV.as_bytes(), path(), &Columns::default()).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].wind_speed_lower, 5.2);
        assert_eq!(readings[1].wind_speed_upper, -999.0);
        assert_eq!(readings[2].timestamp.minute(), 20);
        assert_eq!(readings[0].temperature_c, -3.5);
        assert_eq!(readings[0].direction_deg, 270.0);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "Time,WindSpeed30.ms,Dir.degree,Temp.C\n2011-01-01 00:00:00,5.2,270,-3.5\n";
        let err = read_met_data(csv.as_bytes(), path(), &Columns::default()).unwrap_err();
        match err {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "WindSpeed60.ms"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn bad_number_reports_line_and_column() {
        let csv = "Time,WindSpeed30.ms,WindSpeed60.ms,Dir.degree,Temp.C\n2011-01-01 00:00:00,5.2,abc,270,-3.5\n";
        let err = read_met_data(csv.as_bytes(), path(), &Columns::default()).unwrap_err();
        match err {
            LoadError::Parse { line, column, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, "WindSpeed60.ms");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let csv = "Time,WindSpeed30.ms,WindSpeed60.ms,Dir.degree,Temp.C\nyesterday,5.2,6.0,270,-3.5\n";
        let err = read_met_data(csv.as_bytes(), path(), &Columns::default()).unwrap_err();
        assert!(matches!(err, LoadError::Timestamp { .. }));
    }

    #[test]
    fn accepts_several_timestamp_layouts() {
        assert_eq!(parse_timestamp("2011-09-01 13:40").unwrap().hour(), 13);
        assert_eq!(parse_timestamp("9/1/2011 13:40").unwrap().month(), 9);
        assert_eq!(parse_timestamp("2011-09-01T13:40:00").unwrap().day(), 1);
        assert_eq!(parse_timestamp("2011-09-01").unwrap().hour(), 0);
        assert!(parse_timestamp("01.09.2011").is_none());
    }

    #[test]
    fn reads_power_curve() {
        let csv = "WindSpeed.ms,Power.kW\n0,0\n0.25,0\n3.5,25.4\n";
        let curve = read_power_curve(csv.as_bytes(), path(), &Columns::default()).unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.entries()[2], PowerCurveEntry { wind_speed: 3.5, power_kw: 25.4 });
    }

    #[test]
    fn unordered_power_curve_is_rejected() {
        let csv = "WindSpeed.ms,Power.kW\n0.5,0\n0.25,0\n";
        let err = read_power_curve(csv.as_bytes(), path(), &Columns::default()).unwrap_err();
        assert!(matches!(err, LoadError::Unordered { line: 3, .. }));
    }

    #[test]
    fn empty_power_curve_is_rejected() {
        let csv = "WindSpeed.ms,Power.kW\n";
        let err = read_power_curve(csv.as_bytes(), path(), &Columns::default()).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_power_curve(&dir.path().join("PowerCurve.csv"), &Columns::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn loads_met_data_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MET_CSV.as_bytes()).unwrap();
        let readings = load_met_data(file.path(), &Columns::default()).unwrap();
        assert_eq!(readings.len(), 3);
    }
}
