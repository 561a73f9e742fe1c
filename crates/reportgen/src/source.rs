//! Data sources
//!
//! A data source is either a workbook (first worksheet) or delimited text.
//! Both produce the same rows: keyed by the trimmed header labels, with
//! line breaks inside values flattened and blank rows dropped.

use std::path::Path;

use reportgen_core::{flatten_line_breaks, DataRow, RawValue};
use reportgen_csv::{CsvReadOptions, CsvReader};
use reportgen_xlsx::{SheetTable, XlsxReader};

use crate::error::{Error, Result};

/// Kind of data source, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.xlsx` workbook
    Workbook,
    /// Anything else is read as CSV
    Delimited,
}

impl SourceKind {
    /// Classify a path by its extension (case-insensitive)
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") => SourceKind::Workbook,
            _ => SourceKind::Delimited,
        }
    }
}

/// Load every non-blank row of a data source
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<DataRow>> {
    let path = path.as_ref();
    let rows = match SourceKind::of(path) {
        SourceKind::Workbook => {
            let table = XlsxReader::read_first_sheet(path)
                .map_err(|e| Error::unreadable_source(path, e))?;
            rows_from_table(&table)
        }
        SourceKind::Delimited => CsvReader::read_file(path, &CsvReadOptions::default())
            .map_err(|e| Error::unreadable_source(path, e))?,
    };

    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Rows of a worksheet keyed by its first row
pub fn rows_from_table(table: &SheetTable) -> Vec<DataRow> {
    let header = table.header();
    let mut skipped = 0usize;

    let rows: Vec<DataRow> = table
        .body()
        .iter()
        .filter_map(|cells| {
            let mut row = DataRow::new();
            for (label, value) in header.iter().zip(cells) {
                if !label.is_empty() {
                    row.insert(label.as_str(), normalize(value));
                }
            }
            if row.is_blank() {
                skipped += 1;
                None
            } else {
                Some(row)
            }
        })
        .collect();

    if skipped > 0 {
        log::debug!("Skipped {} blank rows in sheet '{}'", skipped, table.name);
    }
    rows
}

fn normalize(value: &RawValue) -> RawValue {
    match value {
        RawValue::Text(text) => {
            let text = flatten_line_breaks(text);
            let text = text.trim();
            if text.is_empty() {
                RawValue::Empty
            } else {
                RawValue::text(text)
            }
        }
        other => other.clone(),
    }
}
