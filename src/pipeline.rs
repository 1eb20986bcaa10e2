//! Wiring of the stages: load, filter, shape one chart per indicator, compose.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::filter::filter_dataset;
use crate::models::FilteredTable;
use crate::shape::{shape_horizontal_bars, shape_lines, shape_pie, shape_vertical_bars};
use crate::storage::load_dataset;
use crate::viz::{Figure, FigureLayout, PanelSpec, compose_figure};
use log::{info, warn};
use std::path::PathBuf;

/// Shape the four panels from an already filtered table.
///
/// Indicators are taken in config order: vertical bars, pie, horizontal bars, line.
pub fn build_figure(table: &FilteredTable, cfg: &AnalysisConfig) -> Result<Figure> {
    cfg.validate()?;
    let [bars, pie, hbars, lines] = [0, 1, 2, 3].map(|i| {
        let name = cfg.indicators[i].clone();
        let sub = table.for_indicator(&name);
        if sub.is_empty() {
            warn!("No rows matched indicator '{}'", name);
        }
        (name, sub)
    });

    Ok(Figure {
        panels: [
            PanelSpec::VerticalBars {
                spec: shape_vertical_bars(&bars.1, cfg.bar_width),
                title: bars.0,
            },
            PanelSpec::Pie {
                spec: shape_pie(&pie.1, cfg.pie_year)?,
                title: pie.0,
            },
            PanelSpec::HorizontalBars {
                spec: shape_horizontal_bars(&hbars.1),
                title: hbars.0,
            },
            PanelSpec::Lines {
                spec: shape_lines(&lines.1),
                title: lines.0,
            },
        ],
    })
}

/// Run the whole analysis and return the path of the written figure.
pub fn run(cfg: &AnalysisConfig) -> Result<PathBuf> {
    cfg.validate()?;
    let dataset = load_dataset(&cfg.input)?;
    let table = filter_dataset(&dataset, &cfg.criteria())?;
    info!(
        "Filtered {} of {} rows across {} countries",
        table.len(),
        dataset.len(),
        table.countries().len()
    );
    let figure = build_figure(&table, cfg)?;
    compose_figure(&figure, &FigureLayout::from_config(cfg), &cfg.output)?;
    info!("Wrote {}", cfg.output.display());
    Ok(cfg.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndicatorRow;

    fn row(country: &str, indicator: &str, values: &[Option<f64>]) -> IndicatorRow {
        IndicatorRow {
            country_name: country.into(),
            indicator_name: indicator.into(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn panels_follow_indicator_order() {
        let cfg = AnalysisConfig {
            years: vec![2004, 2005],
            ..AnalysisConfig::default()
        };
        let table = FilteredTable {
            years: vec![2004, 2005],
            rows: cfg
                .indicators
                .iter()
                .map(|ind| row("Ghana", ind, &[Some(1.0), Some(2.0)]))
                .collect(),
        };
        let fig = build_figure(&table, &cfg).unwrap();
        for (panel, ind) in fig.panels.iter().zip(&cfg.indicators) {
            assert_eq!(panel.title(), ind);
        }
        assert!(matches!(fig.panels[1], PanelSpec::Pie { .. }));
    }

    #[test]
    fn empty_table_still_builds() {
        let cfg = AnalysisConfig::default();
        let table = FilteredTable {
            years: cfg.years.clone(),
            rows: vec![],
        };
        let fig = build_figure(&table, &cfg).unwrap();
        match &fig.panels[0] {
            PanelSpec::VerticalBars { spec, .. } => {
                assert!(spec.series.is_empty());
                assert_eq!(spec.ticks.len(), cfg.years.len());
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }
}
