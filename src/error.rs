//! Error taxonomy shared by the loader, filter, shapers and composer.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the pipeline can surface. None of them are retried.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input resource is missing, unreadable, or not a supported table.
    #[error("data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A required column (country, indicator, or a year) is absent from the header.
    #[error("column missing: {0}")]
    ColumnMissing(String),

    /// A pie wedge would be sized by a negative aggregate.
    #[error("negative value {value} for {country} cannot be drawn as a pie wedge")]
    NegativeWedge { country: String, value: f64 },

    /// Configuration file could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No TrueType font could be registered for text rendering.
    #[error("no usable font: {0}")]
    FontUnavailable(String),

    /// Drawing failed before anything was written.
    #[error("render failed: {0}")]
    Render(String),

    /// The composed figure could not be written to its output path.
    #[error("export to {} failed: {reason}", path.display())]
    ExportFailed { path: PathBuf, reason: String },
}

impl AnalysisError {
    pub(crate) fn render<E: std::fmt::Debug>(e: E) -> Self {
        AnalysisError::Render(format!("{:?}", e))
    }
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
