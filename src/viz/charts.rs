//! One drawing routine per panel kind. Each routine splits its cell into a plot area and a
//! legend area on the right, then draws the shaped data.

use num_format::Locale;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::legend::draw_legend_panel;
use super::types::LegendGlyph;
use super::util::{
    GRID_GRAY, bright_color, format_tick, left_label_area_px, muted_color, office_color,
    value_range, wedge_points,
};
use crate::error::{AnalysisError, Result};
use crate::shape::{HorizontalBarSpec, LineSpec, PieSpec, VerticalBarSpec};

/// Share of a panel's width given to the plot; the rest holds the legend.
const PLOT_SHARE_PERCENT: u32 = 74;
const Y_TICKS: usize = 8;

/// Pixel sizes and number formatting shared by all panels.
#[derive(Debug, Clone, Copy)]
pub struct PanelText {
    pub title_px: u32,
    pub desc_px: u32,
    pub tick_px: u32,
    pub legend_px: u32,
    pub locale: &'static Locale,
    pub dec_sep: char,
}

impl PanelText {
    fn tick(&self, v: f64) -> String {
        format_tick(v, self.locale, self.dec_sep)
    }
}

fn split_cell<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    text: &PanelText,
) -> (DrawingArea<DB, Shift>, DrawingArea<DB, Shift>) {
    let (plot, legend) = cell.split_horizontally(PLOT_SHARE_PERCENT.percent_width());
    // Legend starts level with the top of the plotting frame, below the caption.
    let legend = legend.margin(text.title_px * 2, 0, text.desc_px / 2, 0);
    (plot, legend)
}

/// Grouped vertical bars with one tick per year group.
pub fn draw_vertical_bars<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    title: &str,
    spec: &VerticalBarSpec,
    text: &PanelText,
) -> Result<()> {
    let (plot, legend_area) = split_cell(cell, text);

    let w = spec.bar_width;
    let n_years = spec.ticks.len().max(1);
    let n_series = spec.series.len().max(1);
    let x_lo = -w;
    let x_hi = (n_years - 1) as f64 + n_series as f64 * w;
    let (y_lo, y_hi) = value_range(
        spec.series
            .iter()
            .flat_map(|s| s.bars.iter().filter_map(|b| b.height)),
    );

    let y_label_fmt = |v: &f64| text.tick(*v);
    let left = left_label_area_px(y_lo, y_hi, Y_TICKS, text.tick_px, &|v| text.tick(v));

    let mut chart = ChartBuilder::on(&plot)
        .margin(text.desc_px)
        .caption(title, (FontFamily::SansSerif, text.title_px))
        .set_label_area_size(LabelAreaPosition::Left, left)
        .set_label_area_size(LabelAreaPosition::Bottom, text.tick_px * 2 + text.desc_px * 2)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(AnalysisError::render)?;

    // Year labels sit under the group centers, so the mesh draws none.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Year")
        .y_desc("Value")
        .x_labels(0)
        .y_labels(Y_TICKS)
        .y_label_formatter(&y_label_fmt)
        .bold_line_style(GRID_GRAY)
        .light_line_style(TRANSPARENT)
        .axis_style(GRID_GRAY)
        .label_style((FontFamily::SansSerif, text.tick_px))
        .axis_desc_style((FontFamily::SansSerif, text.desc_px))
        .draw()
        .map_err(AnalysisError::render)?;

    let base = plot.get_base_pixel();
    let tick_style =
        TextStyle::from((FontFamily::SansSerif, text.tick_px)).pos(Pos::new(HPos::Center, VPos::Top));
    for (x, label) in &spec.ticks {
        let (px, py) = chart.backend_coord(&(*x, y_lo));
        plot.draw(&Text::new(
            label.as_str(),
            (px - base.0, py - base.1 + (text.tick_px / 2) as i32),
            tick_style.clone(),
        ))
        .map_err(AnalysisError::render)?;
    }

    let mut legend_items = Vec::with_capacity(spec.series.len());
    for (idx, series) in spec.series.iter().enumerate() {
        let color = office_color(idx);
        chart
            .draw_series(series.bars.iter().filter_map(|b| {
                b.height.map(|h| {
                    Rectangle::new(
                        [(b.x - w / 2.0, 0.0f64.min(h)), (b.x + w / 2.0, 0.0f64.max(h))],
                        color.filled(),
                    )
                })
            }))
            .map_err(AnalysisError::render)?;
        legend_items.push((series.label.clone(), color));
    }

    draw_legend_panel(&legend_area, &legend_items, "", LegendGlyph::Patch, text.legend_px)
}

/// Pie of per-country shares, wedges laid out counter-clockwise from `start_angle_deg`.
pub fn draw_pie<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    title: &str,
    spec: &PieSpec,
    text: &PanelText,
) -> Result<()> {
    let (plot, legend_area) = split_cell(cell, text);
    let (w, h) = plot.dim_in_pixel();

    let caption_h = text.title_px as i32 * 2;
    plot.draw(&Text::new(
        title,
        (w as i32 / 2, text.desc_px as i32 + text.title_px as i32 / 2),
        TextStyle::from((FontFamily::SansSerif, text.title_px)).pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(AnalysisError::render)?;

    let body_h = (h as i32 - caption_h).max(1);
    let center = (w as i32 / 2, caption_h + body_h / 2);
    let radius = (w as i32).min(body_h) as f64 * 0.42;

    let mut legend_items = Vec::with_capacity(spec.slices.len());
    for (idx, (slice, (start, end))) in spec.slices.iter().zip(spec.wedge_angles()).enumerate() {
        let color = bright_color(idx);
        if slice.fraction > 0.0 {
            plot.draw(&Polygon::new(
                wedge_points(center, radius, start, end),
                color.filled(),
            ))
            .map_err(AnalysisError::render)?;
        }
        legend_items.push((slice.label.clone(), color));
    }

    draw_legend_panel(
        &legend_area,
        &legend_items,
        "Country: Value",
        LegendGlyph::Patch,
        text.legend_px,
    )
}

/// One horizontal bar per country; first country at the bottom.
pub fn draw_horizontal_bars<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    title: &str,
    spec: &HorizontalBarSpec,
    text: &PanelText,
) -> Result<()> {
    let (plot, legend_area) = split_cell(cell, text);

    let n = spec.bars.len();
    let (x_lo, x_hi) = value_range(spec.bars.iter().filter_map(|b| b.value));
    let names: Vec<&str> = spec.bars.iter().map(|b| b.country.as_str()).collect();

    let x_label_fmt = |v: &f64| text.tick(*v);
    let left = names
        .iter()
        .map(|s| super::text::estimate_text_width_px(s, text.tick_px))
        .max()
        .unwrap_or(0)
        + text.tick_px * 3;

    let mut chart = ChartBuilder::on(&plot)
        .margin(text.desc_px)
        .caption(title, (FontFamily::SansSerif, text.title_px))
        .set_label_area_size(LabelAreaPosition::Left, left)
        .set_label_area_size(LabelAreaPosition::Bottom, text.tick_px * 2 + text.desc_px * 2)
        .build_cartesian_2d(x_lo..x_hi, -0.5..(n.max(1) as f64 - 0.5))
        .map_err(AnalysisError::render)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Average Value")
        .y_desc("Country")
        .x_labels(Y_TICKS)
        .y_labels(0)
        .x_label_formatter(&x_label_fmt)
        .bold_line_style(GRID_GRAY)
        .light_line_style(TRANSPARENT)
        .axis_style(GRID_GRAY)
        .label_style((FontFamily::SansSerif, text.tick_px))
        .axis_desc_style((FontFamily::SansSerif, text.desc_px))
        .draw()
        .map_err(AnalysisError::render)?;

    // Country names at the bar centers.
    let base = plot.get_base_pixel();
    let name_style =
        TextStyle::from((FontFamily::SansSerif, text.tick_px)).pos(Pos::new(HPos::Right, VPos::Center));
    for (idx, name) in names.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(x_lo, idx as f64));
        plot.draw(&Text::new(
            *name,
            (px - base.0 - (text.tick_px / 2) as i32, py - base.1),
            name_style.clone(),
        ))
        .map_err(AnalysisError::render)?;
    }

    let mut legend_items = Vec::with_capacity(n);
    for (idx, bar) in spec.bars.iter().enumerate() {
        let color = muted_color(idx);
        if let Some(v) = bar.value {
            let y = idx as f64;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(0.0f64.min(v), y - 0.4), (0.0f64.max(v), y + 0.4)],
                    color.filled(),
                )))
                .map_err(AnalysisError::render)?;
        }
        legend_items.push((bar.label.clone(), color));
    }

    draw_legend_panel(
        &legend_area,
        &legend_items,
        "Country: Average",
        LegendGlyph::Patch,
        text.legend_px,
    )
}

/// Line + circle markers per country over the year axis.
pub fn draw_lines<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    title: &str,
    spec: &LineSpec,
    text: &PanelText,
) -> Result<()> {
    let (plot, legend_area) = split_cell(cell, text);

    let (mut min_year, mut max_year) = (
        spec.years.iter().copied().min().unwrap_or(0),
        spec.years.iter().copied().max().unwrap_or(0),
    );
    if min_year == max_year {
        min_year -= 1;
        max_year += 1;
    }
    let (y_lo, y_hi) = line_value_range(spec);

    let x_label_fmt = |x: &i32| x.to_string();
    let y_label_fmt = |v: &f64| text.tick(*v);
    let left = left_label_area_px(y_lo, y_hi, Y_TICKS, text.tick_px, &|v| text.tick(v));
    let x_label_count = ((max_year - min_year + 1) as usize).min(12);

    let mut chart = ChartBuilder::on(&plot)
        .margin(text.desc_px)
        .caption(title, (FontFamily::SansSerif, text.title_px))
        .set_label_area_size(LabelAreaPosition::Left, left)
        .set_label_area_size(LabelAreaPosition::Bottom, text.tick_px * 2 + text.desc_px * 2)
        .build_cartesian_2d(min_year..max_year, y_lo..y_hi)
        .map_err(AnalysisError::render)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Value")
        .x_labels(x_label_count)
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .bold_line_style(GRID_GRAY)
        .light_line_style(TRANSPARENT)
        .axis_style(GRID_GRAY)
        .label_style((FontFamily::SansSerif, text.tick_px))
        .axis_desc_style((FontFamily::SansSerif, text.desc_px))
        .draw()
        .map_err(AnalysisError::render)?;

    let stroke = (text.tick_px / 8).max(2);
    let marker = (text.tick_px / 3).max(3);
    let mut legend_items = Vec::with_capacity(spec.series.len());
    for (idx, series) in spec.series.iter().enumerate() {
        let color = office_color(idx);
        let style = ShapeStyle {
            color,
            filled: false,
            stroke_width: stroke,
        };
        chart
            .draw_series(LineSeries::new(series.points.clone(), style))
            .map_err(AnalysisError::render)?;
        chart
            .draw_series(
                series
                    .points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), marker, color.filled())),
            )
            .map_err(AnalysisError::render)?;
        legend_items.push((series.label.clone(), color));
    }

    draw_legend_panel(&legend_area, &legend_items, "", LegendGlyph::LineMarker, text.legend_px)
}

/// Data range of a line chart with 5% headroom; unlike bars it need not include zero.
fn line_value_range(spec: &LineSpec) -> (f64, f64) {
    let values: Vec<f64> = spec
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, v)| *v))
        .collect();
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let (mut lo, mut hi) = (
        values.iter().cloned().fold(f64::INFINITY, f64::min),
        values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    );
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}
