//! Row selection by country / indicator membership and projection onto year columns.

use crate::error::{AnalysisError, Result};
use crate::models::{COUNTRY_COLUMN, Dataset, FilterCriteria, FilteredTable, INDICATOR_COLUMN, IndicatorRow};
use log::info;
use std::collections::HashSet;

fn require_column(ds: &Dataset, name: &str) -> Result<usize> {
    ds.column_index(name)
        .ok_or_else(|| AnalysisError::ColumnMissing(name.to_string()))
}

/// Keep rows whose country and indicator are members of the criteria sets,
/// projected onto the requested years in the requested order.
///
/// No matching rows is not an error; the result is simply empty.
pub fn filter_dataset(ds: &Dataset, criteria: &FilterCriteria) -> Result<FilteredTable> {
    let country_idx = require_column(ds, COUNTRY_COLUMN)?;
    let indicator_idx = require_column(ds, INDICATOR_COLUMN)?;
    let year_idx: Vec<usize> = criteria
        .years
        .iter()
        .map(|y| require_column(ds, &y.to_string()))
        .collect::<Result<_>>()?;

    let countries: HashSet<&str> = criteria.countries.iter().map(String::as_str).collect();
    let indicators: HashSet<&str> = criteria.indicators.iter().map(String::as_str).collect();

    let mut rows = Vec::new();
    for cells in &ds.rows {
        let text_at = |i: usize| cells.get(i).map(|c| c.as_text()).unwrap_or_default();
        let country = text_at(country_idx);
        let indicator = text_at(indicator_idx);
        if !countries.contains(country.as_str()) || !indicators.contains(indicator.as_str()) {
            continue;
        }
        let values = year_idx
            .iter()
            .map(|i| cells.get(*i).and_then(|c| c.as_number()))
            .collect();
        rows.push(IndicatorRow {
            country_name: country,
            indicator_name: indicator,
            values,
        });
    }

    info!(
        "filter kept {} of {} rows ({} years)",
        rows.len(),
        ds.rows.len(),
        criteria.years.len()
    );
    Ok(FilteredTable {
        years: criteria.years.clone(),
        rows,
    })
}
