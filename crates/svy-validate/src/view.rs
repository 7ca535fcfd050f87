//! Row/column views over the survey dataset.
//!
//! [`DatasetView`] wraps the loaded `DataFrame` with the two access paths
//! every check needs: the raw view (trimmed strings, blank ⇔ no answer)
//! and the numeric view (per-cell `Option<f64>`, coercion failure ⇒ `None`,
//! never an error). The first dataset column is the respondent identifier
//! and is excluded from the numeric view.

use std::collections::HashMap;

use polars::prelude::{AnyValue, DataFrame};

use svy_ingest::{any_to_f64, any_to_string};
use svy_model::{CaseInsensitiveLookup, Result, SvyError};

#[derive(Debug)]
pub struct DatasetView {
    columns: Vec<String>,
    id_column: String,
    raw: HashMap<String, Vec<String>>,
    numeric: HashMap<String, Vec<Option<f64>>>,
    lookup: CaseInsensitiveLookup,
    height: usize,
}

impl DatasetView {
    /// Build the raw and numeric views in one pass over the frame.
    pub fn new(df: &DataFrame) -> Result<Self> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        if columns.is_empty() {
            return Err(SvyError::EmptyDataset);
        }
        let id_column = columns[0].clone();
        let height = df.height();

        let mut raw = HashMap::new();
        let mut numeric = HashMap::new();
        for name in &columns {
            let column = df
                .column(name)
                .map_err(|error| SvyError::Message(format!("column {name}: {error}")))?;
            let mut raw_values = Vec::with_capacity(height);
            let mut numeric_values = Vec::with_capacity(height);
            for idx in 0..height {
                let value = column.get(idx).unwrap_or(AnyValue::Null);
                numeric_values.push(any_to_f64(value.clone()));
                raw_values.push(any_to_string(value).trim().to_string());
            }
            if *name != id_column {
                numeric.insert(name.clone(), numeric_values);
            }
            raw.insert(name.clone(), raw_values);
        }

        let lookup = CaseInsensitiveLookup::new(&columns);
        Ok(Self {
            columns,
            id_column,
            raw,
            numeric,
            lookup,
            height,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All column names in dataset order, respondent identifier first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Respondent identifier for a row, as authored.
    pub fn respondent_id(&self, row: usize) -> &str {
        self.raw
            .get(&self.id_column)
            .and_then(|values| values.get(row))
            .map_or("", String::as_str)
    }

    /// Case-insensitive column name resolution to the original spelling.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        self.lookup.get(name.trim())
    }

    /// Raw cell text; `None` for blank/whitespace-only cells and unknown
    /// columns.
    pub fn raw(&self, column: &str, row: usize) -> Option<&str> {
        let value = self.raw.get(column)?.get(row)?;
        if value.is_empty() { None } else { Some(value) }
    }

    pub fn is_blank(&self, column: &str, row: usize) -> bool {
        self.raw(column, row).is_none()
    }

    /// Numeric view of a cell; `None` for blanks, coercion failures, and
    /// the respondent-identifier column.
    pub fn numeric(&self, column: &str, row: usize) -> Option<f64> {
        self.numeric.get(column)?.get(row).copied().flatten()
    }
}
