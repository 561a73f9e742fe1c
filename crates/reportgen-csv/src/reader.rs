//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use reportgen_core::{flatten_line_breaks, DataRow, RawValue};

const BOM: char = '\u{feff}';

/// CSV data source reader.
///
/// The first record is the header row; every later record becomes a
/// [`DataRow`] keyed by the header labels.
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into data rows
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Vec<DataRow>> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into data rows
    pub fn read<R: Read>(mut reader: R, options: &CsvReadOptions) -> CsvResult<Vec<DataRow>> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let content = content.strip_prefix(BOM).unwrap_or(&content);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(content.as_bytes());

        let labels: Vec<Option<String>> = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(col, label)| {
                let label = Self::normalize(label, options);
                if label.is_empty() {
                    log::warn!("ignoring CSV column {} with a blank label", col + 1);
                    None
                } else {
                    Some(label)
                }
            })
            .collect();

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for result in csv_reader.records() {
            let record = result?;

            let mut row = DataRow::new();
            for (label, field) in labels.iter().zip(record.iter()) {
                if let Some(label) = label {
                    row.insert(label.as_str(), Self::value(field, options));
                }
            }

            if options.skip_blank_rows && row.is_blank() {
                skipped += 1;
                continue;
            }
            rows.push(row);
        }

        log::debug!(
            "read {} CSV rows over {} columns ({} blank rows skipped)",
            rows.len(),
            labels.iter().flatten().count(),
            skipped
        );
        Ok(rows)
    }

    fn normalize(field: &str, options: &CsvReadOptions) -> String {
        let field = if options.flatten_newlines {
            flatten_line_breaks(field)
        } else {
            field.into()
        };
        if options.trim {
            field.trim().to_string()
        } else {
            field.into_owned()
        }
    }

    fn value(field: &str, options: &CsvReadOptions) -> RawValue {
        let field = Self::normalize(field, options);
        if field.is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(field)
        }
    }
}
