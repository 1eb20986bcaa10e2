//! Legend panel drawn to the right of each chart, outside its plotting area.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::wrap_text_to_width;
use super::types::LegendGlyph;
use super::util::GRID_GRAY;
use crate::error::{AnalysisError, Result};

/// Height in pixels the legend needs for `labels` at the given width.
///
/// Mirrors the layout constants of `draw_legend_panel`.
pub fn estimate_legend_height_px(labels: &[String], has_title: bool, width: u32, font_px: u32) -> i32 {
    let line_h = (font_px as f32 * 1.3).round() as i32;
    let pad = (font_px / 2) as i32;
    let text_x = pad * 2 + font_px as i32 * 2;
    let max_text_w = (width as i32 - text_x - pad).max(40) as u32;
    let mut h = pad * 2;
    if has_title {
        h += line_h + pad;
    }
    for label in labels {
        let lines = wrap_text_to_width(label, font_px, max_text_w).len().max(1) as i32;
        h += lines * line_h + pad / 2;
    }
    h
}

/// Draw a framed single-column legend in the top-left corner of `legend_area`.
///
/// Long labels wrap to the panel width. An empty `title` is omitted.
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBAColor)],
    title: &str,
    glyph: LegendGlyph,
    font_px: u32,
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    let (w_u32, _) = legend_area.dim_in_pixel();

    // Layout constants (must match estimator)
    let line_h = (font_px as f32 * 1.3).round() as i32;
    let pad = (font_px / 2) as i32;
    let swatch = font_px as i32;
    let text_x = pad * 2 + font_px as i32 * 2;
    let max_text_w = (w_u32 as i32 - text_x - pad).max(40) as u32;

    let has_title = !title.trim().is_empty();
    let labels: Vec<String> = items.iter().map(|(l, _)| l.clone()).collect();
    let box_h = estimate_legend_height_px(&labels, has_title, w_u32, font_px);

    // Frame sized to the longest wrapped line.
    let longest = items
        .iter()
        .flat_map(|(l, _)| wrap_text_to_width(l, font_px, max_text_w))
        .chain(std::iter::once(title.to_string()))
        .map(|s| super::text::estimate_text_width_px(&s, font_px) as i32)
        .max()
        .unwrap_or(0);
    let box_w = (text_x + longest + pad).min(w_u32 as i32 - 1);
    legend_area
        .draw(&Rectangle::new(
            [(0, 0), (box_w, box_h)],
            WHITE.mix(0.85).filled(),
        ))
        .map_err(AnalysisError::render)?;
    legend_area
        .draw(&Rectangle::new([(0, 0), (box_w, box_h)], GRID_GRAY.stroke_width(1)))
        .map_err(AnalysisError::render)?;

    let label_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, font_px)).pos(Pos::new(HPos::Left, VPos::Center));
    let title_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, font_px)).pos(Pos::new(HPos::Center, VPos::Center));

    let mut y = pad;
    if has_title {
        legend_area
            .draw(&Text::new(title, (box_w / 2, y + line_h / 2), title_style))
            .map_err(AnalysisError::render)?;
        y += line_h + pad;
    }

    for (label, color) in items {
        let lines = wrap_text_to_width(label, font_px, max_text_w);
        let block_h = (lines.len().max(1) as i32) * line_h;
        let cy = y + line_h / 2;

        match glyph {
            LegendGlyph::Patch => {
                legend_area
                    .draw(&Rectangle::new(
                        [(pad * 2, cy - swatch / 2), (pad * 2 + swatch, cy + swatch / 2)],
                        color.filled(),
                    ))
                    .map_err(AnalysisError::render)?;
            }
            LegendGlyph::LineMarker => {
                let x0 = pad;
                let x1 = text_x - pad;
                legend_area
                    .draw(&PathElement::new(
                        vec![(x0, cy), (x1, cy)],
                        color.stroke_width((font_px / 6).max(1)),
                    ))
                    .map_err(AnalysisError::render)?;
                legend_area
                    .draw(&Circle::new(((x0 + x1) / 2, cy), swatch / 3, color.filled()))
                    .map_err(AnalysisError::render)?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            legend_area
                .draw(&Text::new(
                    line.as_str(),
                    (text_x, y + i as i32 * line_h + line_h / 2),
                    label_style.clone(),
                ))
                .map_err(AnalysisError::render)?;
        }
        y += block_h + pad / 2;
    }
    Ok(())
}
