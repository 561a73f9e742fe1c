//! Metadata sources
//!
//! Report metadata lives in a workbook with two tables: `Columns` holds one
//! row per displayed field, `Reports` one row of report-level options per
//! report. Both are keyed by the `Report Name` column.

use std::path::{Path, PathBuf};

use reportgen_core::{ColumnSpec, Error as CoreError, MetadataRecord, ReportSpec};
use reportgen_xlsx::{SheetTable, XlsxReader};

use crate::error::{Error, Result};

/// Name of the column declarations sheet
pub const COLUMNS_SHEET: &str = "Columns";
/// Name of the report options sheet
pub const REPORTS_SHEET: &str = "Reports";

/// Anything that can answer metadata lookups by report name
pub trait MetadataSource {
    /// Column declarations of a report in declaration order; empty when the
    /// report is unknown
    fn load_column_specs(&self, report_name: &str) -> Result<Vec<ColumnSpec>>;

    /// Report-level options without columns; `None` when the report is
    /// unknown
    fn load_report_spec(&self, report_name: &str) -> Result<Option<ReportSpec>>;
}

/// Resolve a complete report: its options plus its columns.
///
/// Fails with `MetadataNotFound` when either part is missing.
pub fn resolve_report<M: MetadataSource + ?Sized>(
    source: &M,
    report_name: &str,
) -> Result<ReportSpec> {
    let not_found = || Error::Core(CoreError::MetadataNotFound(report_name.to_string()));

    let columns = source.load_column_specs(report_name)?;
    if columns.is_empty() {
        return Err(not_found());
    }
    let mut spec = source.load_report_spec(report_name)?.ok_or_else(not_found)?;
    spec.columns = columns;

    log::debug!(
        "Resolved report '{}' with {} columns",
        spec.name,
        spec.columns.len()
    );
    Ok(spec)
}

/// Metadata read from an XLSX workbook
#[derive(Debug, Clone)]
pub struct WorkbookMetadata {
    path: Option<PathBuf>,
    columns: SheetTable,
    reports: SheetTable,
}

impl WorkbookMetadata {
    /// Read the `Columns` and `Reports` sheets of a workbook, falling back to
    /// the first and second sheets when they are not named that way
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let tables = XlsxReader::read_file(path).map_err(|source| Error::Metadata {
            path: path.to_path_buf(),
            source,
        })?;

        let pick = |name: &str, index: usize| {
            tables
                .sheet_by_name(name)
                .or_else(|| {
                    let fallback = tables.sheet(index);
                    if let Some(sheet) = fallback {
                        log::debug!("No '{}' sheet, using '{}'", name, sheet.name);
                    }
                    fallback
                })
                .cloned()
                .unwrap_or_else(|| SheetTable::new(name))
        };
        let columns = pick(COLUMNS_SHEET, 0);
        let reports = pick(REPORTS_SHEET, 1);

        log::info!("Loaded metadata from {}", path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            columns,
            reports,
        })
    }

    /// Build from already loaded tables
    pub fn from_tables(columns: SheetTable, reports: SheetTable) -> Self {
        Self {
            path: None,
            columns,
            reports,
        }
    }

    /// Workbook path, when read from disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory that relative data source paths are resolved against
    pub fn base_dir(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Records of a table whose `Report Name` is exactly `report_name`
fn records_for<'a>(
    table: &'a SheetTable,
    report_name: &'a str,
) -> impl Iterator<Item = MetadataRecord> + 'a {
    let header = table.header();
    table
        .body()
        .iter()
        .map(move |row| {
            let values = row.iter().map(|v| v.as_text().into_owned()).collect();
            MetadataRecord::new(header.as_slice(), values)
        })
        .filter(move |record| record.report_name() == Some(report_name))
}

impl MetadataSource for WorkbookMetadata {
    fn load_column_specs(&self, report_name: &str) -> Result<Vec<ColumnSpec>> {
        let mut columns = Vec::new();
        for record in records_for(&self.columns, report_name) {
            match ColumnSpec::from_record(&record) {
                Ok(column) => columns.push(column),
                Err(CoreError::MissingAttribute(label)) => {
                    log::debug!("Skipping column row of '{}' without {}", report_name, label);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(columns)
    }

    fn load_report_spec(&self, report_name: &str) -> Result<Option<ReportSpec>> {
        Ok(records_for(&self.reports, report_name)
            .next()
            .map(|record| ReportSpec::from_record(&record, Vec::new())))
    }
}
