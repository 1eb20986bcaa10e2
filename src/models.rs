
/// Header of the country identity column.
pub const COUNTRY_COLUMN: &str = "Country Name";
/// Header of the indicator identity column.
pub const INDICATOR_COLUMN: &str = "Indicator Name";

/// One spreadsheet cell after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Numeric view of the cell; text, blanks and non-finite numbers read as missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Text view used for identity columns. Numbers are printed with `Display`.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(v) => v.to_string(),
            Cell::Empty => String::new(),
        }
    }

    /// Classify a raw text field (CSV, or a string cell in a workbook).
    /// Numeric-looking text becomes a number; World Bank placeholders like `..` stay text.
    pub fn from_text(raw: &str) -> Cell {
        let t = raw.trim();
        if t.is_empty() {
            Cell::Empty
        } else if let Ok(v) = t.parse::<f64>() {
            Cell::Number(v)
        } else {
            Cell::Text(t.to_string())
        }
    }
}

/// Full table as loaded from the input resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Position of a header by exact (trimmed) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalize a header label: `2000.0` and `2000` both become `"2000"`.
pub fn normalize_header(raw: &str) -> String {
    let t = raw.trim();
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        _ => t.to_string(),
    }
}

/// Which rows and year columns to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub countries: Vec<String>,
    pub indicators: Vec<String>,
    /// Ordered; also the x-axis order of the bar and line charts.
    pub years: Vec<i32>,
}

/// One retained row: identity plus one value per requested year (same order as `FilteredTable::years`).
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub country_name: String,
    pub indicator_name: String,
    pub values: Vec<Option<f64>>,
}

/// Dataset restricted to the requested countries, indicators and years.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredTable {
    pub years: Vec<i32>,
    pub rows: Vec<IndicatorRow>,
}

impl FilteredTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Further restriction to a single indicator, row order preserved.
    pub fn for_indicator(&self, indicator: &str) -> FilteredTable {
        FilteredTable {
            years: self.years.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| r.indicator_name == indicator)
                .cloned()
                .collect(),
        }
    }

    /// Distinct countries in first-appearance order.
    pub fn countries(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in &self.rows {
            if !out.contains(&r.country_name.as_str()) {
                out.push(r.country_name.as_str());
            }
        }
        out
    }

    /// Index of a year column, if present.
    pub fn year_index(&self, year: i32) -> Option<usize> {
        self.years.iter().position(|y| *y == year)
    }

    /// Back to a plain `Dataset` with identity + year headers.
    pub fn to_dataset(&self) -> Dataset {
        let mut headers = vec![COUNTRY_COLUMN.to_string(), INDICATOR_COLUMN.to_string()];
        headers.extend(self.years.iter().map(|y| y.to_string()));
        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut cells = vec![
                    Cell::Text(r.country_name.clone()),
                    Cell::Text(r.indicator_name.clone()),
                ];
                cells.extend(r.values.iter().map(|v| match v {
                    Some(x) => Cell::Number(*x),
                    None => Cell::Empty,
                }));
                cells
            })
            .collect();
        Dataset::new(headers, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_collapses_float_years() {
        assert_eq!(normalize_header("2000.0"), "2000");
        assert_eq!(normalize_header(" 2005 "), "2005");
        assert_eq!(normalize_header("Country Name"), "Country Name");
    }

    #[test]
    fn text_cells_parse_numbers_but_keep_placeholders() {
        assert_eq!(Cell::from_text("82.5"), Cell::Number(82.5));
        assert_eq!(Cell::from_text(".."), Cell::Text("..".into()));
        assert_eq!(Cell::from_text("  "), Cell::Empty);
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
    }
}
