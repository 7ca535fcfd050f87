//! Raw survey export loading.
//!
//! Reads a CSV export into a string-typed `DataFrame`. All cells are kept
//! as authored; numeric coercion is the validation core's responsibility,
//! not the loader's. The first column is the respondent identifier.

use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use svy_model::{Result, SvyError};

/// Strips BOM and collapses inner whitespace runs in a header cell.
fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Read a survey dataset CSV into a string-typed DataFrame.
///
/// Rows shorter than the header are padded with blanks; extra trailing
/// cells are dropped. A file with no header columns is a structural error.
pub fn read_dataset_csv(path: &Path) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| SvyError::Message(format!("read {}: {error}", path.display())))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| SvyError::Message(format!("read {}: {error}", path.display())))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(SvyError::EmptyDataset);
    }
    if headers[0].is_empty() {
        return Err(SvyError::MissingRespondentId);
    }

    let mut values: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record =
            record.map_err(|error| SvyError::Message(format!("read {}: {error}", path.display())))?;
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(record.get(idx).unwrap_or("").trim().to_string());
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(values)
        .map(|(name, column)| Series::new(name.as_str().into(), column).into_column())
        .collect();
    let df = DataFrame::new(columns)
        .map_err(|error| SvyError::Message(format!("build dataset frame: {error}")))?;
    debug!(rows = df.height(), columns = df.width(), "dataset loaded");
    Ok(df)
}
