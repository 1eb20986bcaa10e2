//! Public types and constants for the visualization module.

use crate::config::AnalysisConfig;
use std::path::PathBuf;
use crate::shape::{HorizontalBarSpec, LineSpec, PieSpec, VerticalBarSpec};

/// Legend swatch drawn next to each label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendGlyph {
    /// Filled square (bars, wedges).
    Patch,
    /// Short line with a circle marker (line series).
    LineMarker,
}

/// Everything needed to draw one panel: its title plus the shaped data.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelSpec {
    VerticalBars { title: String, spec: VerticalBarSpec },
    Pie { title: String, spec: PieSpec },
    HorizontalBars { title: String, spec: HorizontalBarSpec },
    Lines { title: String, spec: LineSpec },
}

impl PanelSpec {
    pub fn title(&self) -> &str {
        match self {
            PanelSpec::VerticalBars { title, .. }
            | PanelSpec::Pie { title, .. }
            | PanelSpec::HorizontalBars { title, .. }
            | PanelSpec::Lines { title, .. } => title,
        }
    }
}

/// The four panels in grid order: top-left, top-right, bottom-left, bottom-right.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub panels: [PanelSpec; 4],
}

/// Point sizes of the figure's text, matplotlib-style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub suptitle: f64,
    pub panel_title: f64,
    pub axis_desc: f64,
    pub tick: f64,
    pub legend: f64,
    pub author: f64,
    pub abstract_text: f64,
}

/// Default point sizes (figure title 22pt, author boxes 14pt, abstract 18pt).
pub const DEFAULT_FONT_SIZES: FontSizes = FontSizes {
    suptitle: 22.0,
    panel_title: 12.0,
    axis_desc: 11.0,
    tick: 10.0,
    legend: 10.0,
    author: 14.0,
    abstract_text: 18.0,
};

/// Figure-level decoration and output geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub title: String,
    pub author_lines: Vec<String>,
    pub abstract_text: String,
    pub abstract_wrap_columns: usize,
    pub dpi: u32,
    pub figure_size_inches: (f64, f64),
    pub pad_inches: f64,
    pub locale: String,
    pub fonts: FontSizes,
    /// Explicit TrueType file; system locations are searched when `None`.
    pub font_path: Option<PathBuf>,
}

impl FigureLayout {
    pub fn from_config(cfg: &AnalysisConfig) -> Self {
        Self {
            title: cfg.title.clone(),
            author_lines: cfg.author_lines.clone(),
            abstract_text: cfg.abstract_text.clone(),
            abstract_wrap_columns: cfg.abstract_wrap_columns,
            dpi: cfg.dpi,
            figure_size_inches: cfg.figure_size_inches,
            pad_inches: cfg.pad_inches,
            locale: cfg.locale.clone(),
            fonts: DEFAULT_FONT_SIZES,
            font_path: cfg.font_path.clone(),
        }
    }

    /// Points to pixels at this figure's resolution.
    pub fn px(&self, pt: f64) -> u32 {
        (pt * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }

    pub fn pad_px(&self) -> u32 {
        (self.pad_inches * self.dpi as f64).round() as u32
    }

    /// Width and height of the figure proper (title band + grid), without padding or footer.
    pub fn figure_px(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.figure_size_inches.0 * dpi).round() as u32,
            (self.figure_size_inches.1 * dpi).round() as u32,
        )
    }

    /// Height of the band below the grid holding the author boxes and the abstract.
    pub fn footer_px(&self) -> u32 {
        let author_h = self.author_box_height_px() * self.author_lines.len() as u32;
        let lines = super::text::wrap_columns(&self.abstract_text, self.abstract_wrap_columns).len() as u32;
        let abstract_h = lines * self.abstract_line_height_px();
        let gap = self.px(12.0);
        author_h + abstract_h + gap * 2
    }

    pub fn author_box_height_px(&self) -> u32 {
        (self.px(self.fonts.author) as f64 * 1.9).round() as u32
    }

    pub fn abstract_line_height_px(&self) -> u32 {
        (self.px(self.fonts.abstract_text) as f64 * 1.25).round() as u32
    }

    /// Full output canvas: padding + figure + footer + padding.
    pub fn canvas_px(&self) -> (u32, u32) {
        let (w, h) = self.figure_px();
        let pad = self.pad_px();
        (w + 2 * pad, h + self.footer_px() + 2 * pad)
    }
}
