use crate::error::{AnalysisError, Result};
use crate::models::{Cell, Dataset, normalize_header};
use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use log::{debug, info};
use std::path::Path;

/// Load a table from a spreadsheet (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`) or a `csv` file.
///
/// The first row is the header. Only the first worksheet of a workbook is read.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(unavailable(path, "no such file"));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let ds = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path)?,
        "csv" => load_csv(path)?,
        other => {
            return Err(unavailable(
                path,
                &format!("unsupported input format: {:?}", other),
            ));
        }
    };
    info!(
        "loaded {} rows x {} columns from {}",
        ds.rows.len(),
        ds.headers.len(),
        path.display()
    );
    Ok(ds)
}

fn unavailable(path: &Path, reason: &str) -> AnalysisError {
    AnalysisError::DataUnavailable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn load_workbook(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unavailable(path, &e.to_string()))?;
    let sheet_names = workbook.sheet_names();
    debug!("workbook sheets: {:?}", sheet_names);
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unavailable(path, "workbook has no worksheets"))?
        .map_err(|e| unavailable(path, &e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| unavailable(path, "worksheet is empty"))?;
    let headers: Vec<String> = header_row.iter().map(header_from_data).collect();
    let body: Vec<Vec<Cell>> = rows
        .map(|r| r.iter().map(cell_from_data).collect())
        .collect();
    Ok(Dataset::new(headers, body))
}

fn header_from_data(d: &Data) -> String {
    match d {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => normalize_header(&f.to_string()),
        Data::String(s) => normalize_header(s),
        Data::Empty => String::new(),
        other => normalize_header(&other.to_string()),
    }
}

fn cell_from_data(d: &Data) -> Cell {
    match d {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::from_text(s),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| unavailable(path, &e.to_string()))?;
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| unavailable(path, &e.to_string()))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(unavailable(path, "missing header row"));
    }
    let mut body = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| unavailable(path, &e.to_string()))?;
        body.push(rec.iter().map(Cell::from_text).collect());
    }
    Ok(Dataset::new(headers, body))
}
