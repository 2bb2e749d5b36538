use std::ops::Range;
use std::path::Path;
use chrono::{NaiveDateTime, TimeDelta};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::config::ShearParameters;
use crate::errors::PlotError;
use crate::models::met_data::{DerivedReading, MetReading};

const SIZE: (u32, u32) = (1200, 800);
const SECONDS_PER_DAY: f64 = 86400.0;
const DOTS: usize = 300;

const LOWER_COLOR: RGBColor = RGBColor(31, 119, 180);
const UPPER_COLOR: RGBColor = RGBColor(255, 127, 14);
const HUB_COLOR: RGBColor = RGBColor(44, 160, 44);

/// One named scatter series, x in days from the first reading
struct Series {
    name: String,
    color: RGBColor,
    points: Vec<(f64, f64)>,
}

/// Draws wind speeds, wind direction and air temperature as three stacked
/// scatter panels sharing the same time axis, and writes them to an SVG file.
///
/// Wind speeds are taken from the derived readings, direction and temperature
/// from the readings as loaded (before cleaning).
///
/// # Arguments
///
/// * 'path' - output SVG file
/// * 'readings' - met tower readings as loaded
/// * 'derived' - derived readings
/// * 'heights' - measurement and hub heights, used for legend labels
pub fn plot_met_data(path: &Path, readings: &[MetReading], derived: &[DerivedReading], heights: &ShearParameters) -> Result<(), PlotError> {
    let start = readings.iter().map(|r| r.timestamp).min().ok_or(PlotError::from("no readings to plot"))?;
    let end = readings.iter().map(|r| r.timestamp).max().ok_or(PlotError::from("no readings to plot"))?;
    let x_max = days_since(start, end).max(1.0 / 24.0);
    let label = |x: &f64| (start + TimeDelta::seconds((x * SECONDS_PER_DAY) as i64)).format("%Y-%m-%d").to_string();

    let speeds = vec![
        series(format!("{}m", heights.lower_height), LOWER_COLOR, derived.iter().map(|d| (d.timestamp, d.wind_speed_lower)), start),
        series(format!("{}m", heights.upper_height), UPPER_COLOR, derived.iter().map(|d| (d.timestamp, d.wind_speed_upper)), start),
        series(format!("{}m", heights.hub_height), HUB_COLOR, derived.iter().map(|d| (d.timestamp, d.wind_speed_hub)), start),
    ];
    let direction = vec![series("direction".to_string(), LOWER_COLOR, readings.iter().map(|r| (r.timestamp, r.direction_deg)), start)];
    let temperature = vec![series("temperature".to_string(), LOWER_COLOR, readings.iter().map(|r| (r.timestamp, r.temperature_c)), start)];

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    draw_panel(&panels[0], x_max, &label, "Wind Speed (m/s)", &speeds, true, false)?;
    draw_panel(&panels[1], x_max, &label, "Wind Direction (deg)", &direction, false, false)?;
    draw_panel(&panels[2], x_max, &label, "Air Temperature (C)", &temperature, false, true)?;

    root.present()?;
    info!("chart written to {}", path.display());

    Ok(())
}

fn days_since(start: NaiveDateTime, t: NaiveDateTime) -> f64 {
    (t - start).num_seconds() as f64 / SECONDS_PER_DAY
}

fn series(name: String, color: RGBColor, values: impl Iterator<Item = (NaiveDateTime, f64)>, start: NaiveDateTime) -> Series {
    let points = values
        .filter(|(_, v)| v.is_finite())
        .map(|(t, v)| (days_since(start, t), v))
        .collect();

    Series { name, color, points }
}

/// Y range over all series with some head room, 0..1 when there is nothing to show
fn y_range(series: &[Series], include_zero: bool) -> Range<f64> {
    let values = series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
    let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    if !(min.is_finite() && max.is_finite()) {
        return 0.0..1.0;
    }
    let pad = ((max - min) * 0.05).max(0.5);

    (min - pad)..(max + pad)
}

/// Short horizontal segments with equal gaps, forming a dotted line at height 'y'
fn dotted_segments(x_max: f64, y: f64) -> Vec<Vec<(f64, f64)>> {
    let period = x_max / DOTS as f64;
    (0..DOTS)
        .map(|i| {
            let start = i as f64 * period;
            vec![(start, y), (start + period / 2.0, y)]
        })
        .collect()
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x_max: f64,
    label: &dyn Fn(&f64) -> String,
    y_desc: &str,
    series: &[Series],
    legend: bool,
    zero_line: bool,
) -> Result<(), PlotError> {
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, y_range(series, zero_line))?;

    chart.configure_mesh()
        .y_desc(y_desc)
        .x_label_formatter(label)
        .draw()?;

    for s in series {
        let color = s.color;
        let anno = chart.draw_series(s.points.iter().map(|&(x, y)| Circle::new((x, y), 1, color.filled())))?;
        if legend {
            anno.label(s.name.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
        }
    }

    if zero_line {
        chart.draw_series(dotted_segments(x_max, 0.0).into_iter().map(|seg| PathElement::new(seg, BLACK.stroke_width(1))))?;
    }

    if legend {
        chart.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}
