use wdi_panels::models::{FilteredTable, IndicatorRow};
use wdi_panels::stats::{GroupKey, country_year_means, grouped_summary};

fn ir(indicator: &str, country: &str, values: &[Option<f64>]) -> IndicatorRow {
    IndicatorRow {
        country_name: country.into(),
        indicator_name: indicator.into(),
        values: values.to_vec(),
    }
}

#[test]
fn grouped_stats_handle_missing_and_duplicates() {
    // (IND1, Ghana) spans two rows: [1, 2] and [3, None] -> count 3, missing 1, mean 2
    // (IND1, Chad) has [10, 30] -> mean 20
    let table = FilteredTable {
        years: vec![2018, 2019],
        rows: vec![
            ir("IND1", "Ghana", &[Some(1.0), Some(2.0)]),
            ir("IND1", "Chad", &[Some(10.0), Some(30.0)]),
            ir("IND1", "Ghana", &[Some(3.0), None]),
        ],
    };
    let got = grouped_summary(&table);
    assert_eq!(got.len(), 2);

    let chad = &got[0];
    assert_eq!(
        chad.key,
        GroupKey {
            indicator_name: "IND1".into(),
            country_name: "Chad".into()
        }
    );
    assert_eq!(chad.mean, Some(20.0));

    let ghana = &got[1];
    assert_eq!((ghana.count, ghana.missing), (3, 1));
    assert_eq!((ghana.min, ghana.max, ghana.mean), (Some(1.0), Some(3.0), Some(2.0)));
}

#[test]
fn year_means_align_with_year_columns() {
    let table = FilteredTable {
        years: vec![2000, 2001, 2002],
        rows: vec![
            ir("X", "Mexico", &[Some(4.0), None, None]),
            ir("X", "Mexico", &[Some(6.0), Some(1.0), None]),
        ],
    };
    let means = country_year_means(&table);
    assert_eq!(means["Mexico"], vec![Some(5.0), Some(1.0), None]);
}
