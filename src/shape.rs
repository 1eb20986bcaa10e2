//! Chart shapers: pure functions turning a single-indicator `FilteredTable` into the
//! positions, aggregates and legend text of one chart. Nothing here draws.

use crate::error::{AnalysisError, Result};
use crate::models::FilteredTable;
use crate::stats::{country_year_means, mean_present};
use log::{debug, warn};

/// Width of one bar in the grouped vertical bar chart, in year-slot units.
pub const DEFAULT_BAR_WIDTH: f64 = 0.15;
/// Angle (degrees, counter-clockwise from 3 o'clock) where the first pie wedge starts.
pub const PIE_START_ANGLE_DEG: f64 = 140.0;

/// Legend value for the bar and line charts: `82` for 82.0, `82.5` for 82.5.
pub fn format_value(v: Option<f64>) -> String {
    match v {
        Some(x) => x.to_string(),
        None => "n/a".to_string(),
    }
}

/// Legend value for the pie and horizontal bar charts: two decimals.
pub fn format_fixed2(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.2}", x),
        None => "n/a".to_string(),
    }
}

/// One value vector per distinct country, in first-appearance order.
///
/// Countries with several rows are collapsed into the per-year mean of their present values.
fn country_rows_in_order(table: &FilteredTable) -> Vec<(String, Vec<Option<f64>>)> {
    let countries = table.countries();
    let mut out = Vec::with_capacity(countries.len());
    for country in countries {
        let rows: Vec<&[Option<f64>]> = table
            .rows
            .iter()
            .filter(|r| r.country_name == country)
            .map(|r| r.values.as_slice())
            .collect();
        let values = if rows.len() == 1 {
            rows[0].to_vec()
        } else {
            warn!(
                "{} rows for {}; averaging duplicates per year",
                rows.len(),
                country
            );
            (0..table.years.len())
                .map(|i| mean_present(rows.iter().map(|r| r.get(i).copied().flatten())))
                .collect()
        };
        out.push((country.to_string(), values));
    }
    out
}

// ------------------------ Vertical bars ------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Center of the bar on the x axis.
    pub x: f64,
    /// `None` leaves the slot empty.
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub country: String,
    pub bars: Vec<Bar>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerticalBarSpec {
    pub bar_width: f64,
    pub series: Vec<BarSeries>,
    /// Tick position and label (the year) for every year group.
    pub ticks: Vec<(f64, String)>,
}

impl VerticalBarSpec {
    /// Every bar position, series by series.
    pub fn positions(&self) -> Vec<f64> {
        self.series
            .iter()
            .flat_map(|s| s.bars.iter().map(|b| b.x))
            .collect()
    }
}

/// Grouped vertical bars: country `k` is offset by `k * bar_width` inside each year slot.
pub fn shape_vertical_bars(table: &FilteredTable, bar_width: f64) -> VerticalBarSpec {
    let rows = country_rows_in_order(table);
    let n_countries = rows.len();

    let series: Vec<BarSeries> = rows
        .into_iter()
        .enumerate()
        .map(|(k, (country, values))| {
            let offset = k as f64 * bar_width;
            let bars = values
                .iter()
                .enumerate()
                .map(|(i, v)| Bar {
                    x: i as f64 + offset,
                    height: *v,
                })
                .collect();
            let label = format!("{}: {}", country, format_value(values.last().copied().flatten()));
            BarSeries { country, bars, label }
        })
        .collect();

    let ticks = table
        .years
        .iter()
        .enumerate()
        .map(|(i, y)| (i as f64 + bar_width * (n_countries as f64 / 2.0), y.to_string()))
        .collect();

    debug!("vertical bars: {} countries x {} years", n_countries, table.years.len());
    VerticalBarSpec {
        bar_width,
        series,
        ticks,
    }
}

// ------------------------ Pie ------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub country: String,
    pub mean: Option<f64>,
    /// Share of the whole pie in `[0, 1]`.
    pub fraction: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSpec {
    pub year: i32,
    pub start_angle_deg: f64,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    /// `(start, end)` angle of each wedge in degrees, counter-clockwise.
    pub fn wedge_angles(&self) -> Vec<(f64, f64)> {
        let mut start = self.start_angle_deg;
        self.slices
            .iter()
            .map(|s| {
                let end = start + s.fraction * 360.0;
                let w = (start, end);
                start = end;
                w
            })
            .collect()
    }
}

/// One wedge per country (sorted by name), sized by the mean of `year` over that country's rows.
pub fn shape_pie(table: &FilteredTable, year: i32) -> Result<PieSpec> {
    let idx = table
        .year_index(year)
        .ok_or_else(|| AnalysisError::ColumnMissing(year.to_string()))?;
    let means = country_year_means(table);

    let mut pairs: Vec<(String, Option<f64>)> = Vec::with_capacity(means.len());
    for (country, per_year) in means {
        let mean = per_year.get(idx).copied().flatten();
        if let Some(v) = mean
            && v < 0.0
        {
            return Err(AnalysisError::NegativeWedge { country, value: v });
        }
        pairs.push((country, mean));
    }

    let total: f64 = pairs.iter().filter_map(|(_, m)| *m).sum();
    let slices = pairs
        .into_iter()
        .map(|(country, mean)| {
            let fraction = match mean {
                Some(v) if total > 0.0 => v / total,
                _ => 0.0,
            };
            let label = format!("{}: {}", country, format_fixed2(mean));
            PieSlice {
                country,
                mean,
                fraction,
                label,
            }
        })
        .collect();

    Ok(PieSpec {
        year,
        start_angle_deg: PIE_START_ANGLE_DEG,
        slices,
    })
}

// ------------------------ Horizontal bars ------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalBar {
    pub country: String,
    /// Average across years of the per-year means; `None` when the country has no values.
    pub value: Option<f64>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalBarSpec {
    pub bars: Vec<HorizontalBar>,
}

/// One bar per country (sorted by name): mean over rows per year, then mean over years.
pub fn shape_horizontal_bars(table: &FilteredTable) -> HorizontalBarSpec {
    let bars = country_year_means(table)
        .into_iter()
        .map(|(country, per_year)| {
            let value = mean_present(per_year);
            let label = format!("{}: {}", country, format_fixed2(value));
            HorizontalBar {
                country,
                value,
                label,
            }
        })
        .collect();
    HorizontalBarSpec { bars }
}

// ------------------------ Lines ------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeriesSpec {
    pub country: String,
    /// `(year, value)` in year order; missing years are skipped.
    pub points: Vec<(i32, f64)>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    pub years: Vec<i32>,
    pub series: Vec<LineSeriesSpec>,
}

/// One line per country (first-appearance order), one marker per present year.
pub fn shape_lines(table: &FilteredTable) -> LineSpec {
    let series = country_rows_in_order(table)
        .into_iter()
        .map(|(country, values)| {
            let points = table
                .years
                .iter()
                .zip(values.iter())
                .filter_map(|(y, v)| v.map(|v| (*y, v)))
                .collect();
            let label = format!("{}: {}", country, format_value(values.last().copied().flatten()));
            LineSeriesSpec {
                country,
                points,
                label,
            }
        })
        .collect();
    LineSpec {
        years: table.years.clone(),
        series,
    }
}
