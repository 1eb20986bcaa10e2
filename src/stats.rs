use crate::models::FilteredTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grouping key used by the summary command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub indicator_name: String,
    pub country_name: String,
}

/// Summary statistics for a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub key: GroupKey,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

/// Mean of the present values; `None` when nothing is present.
pub fn mean_present<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n > 0 { Some(sum / n as f64) } else { None }
}

/// Per-country, per-year mean over all rows of that country, countries sorted by name.
///
/// Each inner vector is aligned with `table.years`.
pub fn country_year_means(table: &FilteredTable) -> BTreeMap<String, Vec<Option<f64>>> {
    let mut grouped: BTreeMap<String, Vec<Vec<f64>>> = BTreeMap::new();
    for row in &table.rows {
        let cols = grouped
            .entry(row.country_name.clone())
            .or_insert_with(|| vec![Vec::new(); table.years.len()]);
        for (i, v) in row.values.iter().enumerate() {
            if let (Some(v), Some(col)) = (v, cols.get_mut(i)) {
                col.push(*v);
            }
        }
    }
    grouped
        .into_iter()
        .map(|(country, cols)| {
            let means = cols
                .into_iter()
                .map(|c| mean_present(c.into_iter().map(Some)))
                .collect();
            (country, means)
        })
        .collect()
}

/// Compute grouped statistics by (indicator, country) over every year cell.
pub fn grouped_summary(table: &FilteredTable) -> Vec<Summary> {
    let mut groups: BTreeMap<GroupKey, (Vec<f64>, usize)> = BTreeMap::new();
    for row in &table.rows {
        let key = GroupKey {
            indicator_name: row.indicator_name.clone(),
            country_name: row.country_name.clone(),
        };
        let entry = groups.entry(key).or_default();
        for v in &row.values {
            match v {
                Some(v) => entry.0.push(*v),
                None => entry.1 += 1,
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, (vals, missing))| {
            let count = vals.len();
            let min = vals.iter().copied().reduce(f64::min);
            let max = vals.iter().copied().reduce(f64::max);
            let mean = mean_present(vals.into_iter().map(Some));
            Summary { key, count, missing, min, max, mean }
        })
        .collect()
}
