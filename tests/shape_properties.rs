use wdi_panels::models::{FilteredTable, IndicatorRow};
use wdi_panels::shape::{
    shape_horizontal_bars, shape_lines, shape_pie, shape_vertical_bars, DEFAULT_BAR_WIDTH,
};
use wdi_panels::AnalysisError;

const ENROLLMENT: &str = "School enrollment, primary (% gross)";

fn row(country: &str, values: &[Option<f64>]) -> IndicatorRow {
    IndicatorRow {
        country_name: country.into(),
        indicator_name: ENROLLMENT.into(),
        values: values.to_vec(),
    }
}

fn ghana_mexico() -> FilteredTable {
    FilteredTable {
        years: vec![2000, 2001],
        rows: vec![
            row("Ghana", &[Some(80.0), Some(82.0)]),
            row("Mexico", &[Some(90.0), Some(91.0)]),
        ],
    }
}

#[test]
fn ghana_mexico_grouped_bars() {
    let spec = shape_vertical_bars(&ghana_mexico(), DEFAULT_BAR_WIDTH);
    assert_eq!(spec.series.len(), 2);

    let ghana = &spec.series[0];
    assert_eq!(ghana.country, "Ghana");
    assert_eq!(
        ghana.bars.iter().map(|b| b.height).collect::<Vec<_>>(),
        vec![Some(80.0), Some(82.0)]
    );
    assert_eq!(ghana.bars.iter().map(|b| b.x).collect::<Vec<_>>(), vec![0.0, 1.0]);
    assert_eq!(ghana.label, "Ghana: 82");

    let mexico = &spec.series[1];
    assert_eq!(
        mexico.bars.iter().map(|b| b.height).collect::<Vec<_>>(),
        vec![Some(90.0), Some(91.0)]
    );
    let xs: Vec<f64> = mexico.bars.iter().map(|b| b.x).collect();
    assert!((xs[0] - 0.15).abs() < 1e-12);
    assert!((xs[1] - 1.15).abs() < 1e-12);
    assert_eq!(mexico.label, "Mexico: 91");

    let labels: Vec<&str> = spec.ticks.iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(labels, vec!["2000", "2001"]);
    assert!((spec.ticks[0].0 - 0.15).abs() < 1e-12);
    assert!((spec.ticks[1].0 - 1.15).abs() < 1e-12);
}

#[test]
fn bar_positions_are_distinct_and_complete() {
    let years: Vec<i32> = (2000..=2005).collect();
    let countries = ["Europe & Central Asia", "Ghana", "Malaysia", "Azerbaijan", "Mexico"];
    let table = FilteredTable {
        years: years.clone(),
        rows: countries
            .iter()
            .map(|c| row(c, &vec![Some(1.0); years.len()]))
            .collect(),
    };
    let spec = shape_vertical_bars(&table, DEFAULT_BAR_WIDTH);
    let mut xs = spec.positions();
    assert_eq!(xs.len(), countries.len() * years.len());
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!(xs.windows(2).all(|w| w[1] - w[0] > 1e-9));
}

#[test]
fn pie_scenario_splits_three_to_one() {
    let table = FilteredTable {
        years: vec![2005],
        rows: vec![row("Mexico", &[Some(25.0)]), row("Ghana", &[Some(75.0)])],
    };
    let pie = shape_pie(&table, 2005).unwrap();
    let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Ghana: 75.00", "Mexico: 25.00"]);
    assert!((pie.slices[0].fraction - 0.75).abs() < 1e-12);
    assert!((pie.slices[1].fraction - 0.25).abs() < 1e-12);

    let angles = pie.wedge_angles();
    assert_eq!(angles[0].0, 140.0);
    assert!((angles[1].1 - 500.0).abs() < 1e-9);
}

#[test]
fn pie_fractions_sum_to_one_with_gaps() {
    let table = FilteredTable {
        years: vec![2004, 2005],
        rows: vec![
            row("Ghana", &[None, Some(3.0)]),
            row("Malaysia", &[Some(1.0), None]),
            row("Mexico", &[None, Some(0.0)]),
            row("Azerbaijan", &[None, Some(9.5)]),
        ],
    };
    let pie = shape_pie(&table, 2005).unwrap();
    let sum: f64 = pie.slices.iter().map(|s| s.fraction).sum();
    assert!((sum - 1.0).abs() < 1e-12);
    let malaysia = pie.slices.iter().find(|s| s.country == "Malaysia").unwrap();
    assert_eq!(malaysia.label, "Malaysia: n/a");
    assert_eq!(malaysia.fraction, 0.0);
}

#[test]
fn pie_year_must_be_a_column() {
    assert!(matches!(
        shape_pie(&ghana_mexico(), 1999),
        Err(AnalysisError::ColumnMissing(_))
    ));
}

#[test]
fn horizontal_bars_one_per_country_despite_duplicates() {
    let table = FilteredTable {
        years: vec![2000, 2001],
        rows: vec![
            row("Mexico", &[Some(90.0), Some(92.0)]),
            row("Ghana", &[Some(80.0), Some(82.0)]),
            row("Mexico", &[Some(100.0), None]),
        ],
    };
    let spec = shape_horizontal_bars(&table);
    let names: Vec<&str> = spec.bars.iter().map(|b| b.country.as_str()).collect();
    assert_eq!(names, vec!["Ghana", "Mexico"]);
    // Mexico: per-year means 95 and 92, then 93.5 across years.
    assert_eq!(spec.bars[1].value, Some(93.5));
    assert_eq!(spec.bars[1].label, "Mexico: 93.50");
    assert_eq!(spec.bars[0].label, "Ghana: 81.00");
}

#[test]
fn lines_skip_missing_years() {
    let table = FilteredTable {
        years: vec![2000, 2001, 2002],
        rows: vec![row("Ghana", &[Some(1.5), None, Some(3.0)])],
    };
    let spec = shape_lines(&table);
    assert_eq!(spec.series.len(), 1);
    assert_eq!(spec.series[0].points, vec![(2000, 1.5), (2002, 3.0)]);
    assert_eq!(spec.series[0].label, "Ghana: 3");
}

#[test]
fn every_shaper_tolerates_an_empty_table() {
    let empty = FilteredTable {
        years: vec![2000, 2001],
        rows: vec![],
    };
    let bars = shape_vertical_bars(&empty, DEFAULT_BAR_WIDTH);
    assert!(bars.series.is_empty());
    assert_eq!(bars.ticks.len(), 2);

    let pie = shape_pie(&empty, 2001).unwrap();
    assert!(pie.slices.is_empty());

    assert!(shape_horizontal_bars(&empty).bars.is_empty());
    assert!(shape_lines(&empty).series.is_empty());
}

#[test]
fn all_zero_pie_keeps_every_legend_entry() {
    let table = FilteredTable {
        years: vec![2005],
        rows: vec![row("Mexico", &[Some(0.0)]), row("Ghana", &[Some(0.0)])],
    };
    let pie = shape_pie(&table, 2005).unwrap();
    assert_eq!(pie.slices.len(), 2);
    assert!(pie.slices.iter().all(|s| s.fraction == 0.0));
    let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Ghana: 0.00", "Mexico: 0.00"]);
}

#[test]
fn lines_average_duplicate_country_rows() {
    let table = FilteredTable {
        years: vec![2000, 2001],
        rows: vec![
            row("Ghana", &[Some(10.0), None]),
            row("Ghana", &[Some(20.0), Some(4.0)]),
        ],
    };
    let spec = shape_lines(&table);
    assert_eq!(spec.series.len(), 1);
    assert_eq!(spec.series[0].points, vec![(2000, 15.0), (2001, 4.0)]);
    assert_eq!(spec.series[0].label, "Ghana: 4");
}
