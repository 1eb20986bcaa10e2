//! Run parameters. `Default` reproduces the education-indicators figure; a JSON file
//! can override any subset of fields.

use crate::error::{AnalysisError, Result};
use crate::models::FilterCriteria;
use crate::shape::DEFAULT_BAR_WIDTH;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of chart panels in the composed figure (2x2 grid).
pub const PANEL_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Spreadsheet (or CSV) to read.
    pub input: PathBuf,
    pub countries: Vec<String>,
    /// Exactly four, in panel order: vertical bars, pie, horizontal bars, line.
    pub indicators: Vec<String>,
    pub years: Vec<i32>,
    /// Year whose values size the pie wedges.
    pub pie_year: i32,
    pub bar_width: f64,
    /// Output image; `.svg` selects the SVG backend, anything else PNG.
    pub output: PathBuf,
    pub dpi: u32,
    /// Figure size (width, height) in inches, before padding.
    pub figure_size_inches: (f64, f64),
    /// Blank margin around the whole figure, in inches.
    pub pad_inches: f64,
    /// Locale tag for axis tick thousands separators (`en`, `de`, ...).
    pub locale: String,
    pub title: String,
    pub author_lines: Vec<String>,
    pub abstract_text: String,
    pub abstract_wrap_columns: usize,
    /// TrueType font used for all text; common system locations are searched when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("Education_data.xlsx"),
            countries: [
                "Europe & Central Asia",
                "Ghana",
                "Malaysia",
                "Azerbaijan",
                "Mexico",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            indicators: [
                "Trained teachers in primary education (% of total teachers)",
                "Primary education, pupils",
                "School enrollment, primary (% gross)",
                "School enrollment, primary, female (% gross)",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            years: (2000..=2005).collect(),
            pie_year: 2005,
            bar_width: DEFAULT_BAR_WIDTH,
            output: PathBuf::from("22082221.png"),
            dpi: 300,
            figure_size_inches: (20.0, 15.0),
            pad_inches: 1.0,
            locale: "en".to_string(),
            title: "A Comparative Evaluation of Public Health Measures".to_string(),
            // Top to bottom.
            author_lines: vec![
                "Student ID: 22082221".to_string(),
                "Name: Alan Praveen Putty Francis Xavier".to_string(),
            ],
            abstract_text: concat!(
                "Public health disparities surfaced (2015-2019) among Argentina, Brazil, Mexico, ",
                "the Netherlands, and the United Kingdom. Argentina saw a health indicator decline ",
                "but grappled with 15.5% chronic disease mortality in 2019. Brazil faced a high ",
                "youth mortality rate of 33.9%. Contrastingly, the Netherlands and the United ",
                "Kingdom showcased effective health management, reflected in lower youth mortality ",
                "and declining chronic disease mortality."
            )
            .to_string(),
            abstract_wrap_columns: 100,
            font_path: None,
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config; missing fields fall back to `Default`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|e| {
            AnalysisError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let cfg: AnalysisConfig = serde_json::from_str(&txt).map_err(|e| {
            AnalysisError::InvalidConfig(format!("cannot parse {}: {}", path.display(), e))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            countries: self.countries.clone(),
            indicators: self.indicators.clone(),
            years: self.years.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let bad = |m: String| -> Result<()> { Err(AnalysisError::InvalidConfig(m)) };
        if self.indicators.len() != PANEL_COUNT {
            return bad(format!(
                "expected {} indicators (one per panel), got {}",
                PANEL_COUNT,
                self.indicators.len()
            ));
        }
        if self.years.is_empty() {
            return bad("year list is empty".into());
        }
        if !self.years.contains(&self.pie_year) {
            return bad(format!("pie year {} is not among the years", self.pie_year));
        }
        if !(self.bar_width > 0.0 && self.bar_width < 1.0) {
            return bad(format!("bar width {} must be in (0, 1)", self.bar_width));
        }
        if self.dpi == 0 {
            return bad("dpi must be positive".into());
        }
        let (w, h) = self.figure_size_inches;
        if !(w > 0.0 && h > 0.0) || self.pad_inches < 0.0 {
            return bad("figure size must be positive and padding non-negative".into());
        }
        if self.abstract_wrap_columns == 0 {
            return bad("abstract wrap width must be positive".into());
        }
        if self.countries.len() as f64 * self.bar_width >= 1.0 {
            warn!(
                "{} countries x bar width {} overlaps the next year group",
                self.countries.len(),
                self.bar_width
            );
        }
        Ok(())
    }
}
