//! wdi_panels
//!
//! Load a World Development Indicators style spreadsheet, filter it by country,
//! indicator and year, and compose four charts into one annotated 2×2 figure.
//! Pairs with the `wdi-panels` CLI.
//!
//! ### Features
//! - Read `.xlsx`/`.xls`/`.ods` workbooks (first sheet) or `.csv` files
//! - Grouped vertical bars, pie, horizontal bars and line chart, one per indicator
//! - Title band, author boxes and a wrapped abstract around the grid
//! - PNG or SVG output at a configurable resolution
//!
//! ### Example
//! ```no_run
//! use wdi_panels::{AnalysisConfig, filter_dataset, load_dataset};
//!
//! let cfg = AnalysisConfig::default();
//! let data = load_dataset(&cfg.input)?;
//! let table = filter_dataset(&data, &cfg.criteria())?;
//! let figure = wdi_panels::pipeline::build_figure(&table, &cfg)?;
//! wdi_panels::viz::compose_figure(
//!     &figure,
//!     &wdi_panels::viz::FigureLayout::from_config(&cfg),
//!     "figure.svg",
//! )?;
//! # Ok::<(), wdi_panels::AnalysisError>(())
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod shape;
pub mod stats;
pub mod storage;
pub mod viz;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use filter::filter_dataset;
pub use models::{Cell, Dataset, FilterCriteria, FilteredTable, IndicatorRow};
pub use storage::load_dataset;
