//! Plain tables read from worksheets

use reportgen_core::RawValue;

/// Cell values of one worksheet, row-major.
///
/// Rows without any cell in the file are absent; gaps inside a row are
/// filled with [`RawValue::Empty`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetTable {
    /// Worksheet name
    pub name: String,
    /// Rows in document order
    pub rows: Vec<Vec<RawValue>>,
}

impl SheetTable {
    /// Create an empty table
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// First row as trimmed labels
    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(|v| v.as_text().trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Every row after the header row
    pub fn body(&self) -> &[Vec<RawValue>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Number of rows, header included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the sheet has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: RawValue) {
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, RawValue::Empty);
        }
        cells[col] = value;
    }
}

/// All worksheets of a workbook, in workbook order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbookTables {
    sheets: Vec<SheetTable>,
}

impl WorkbookTables {
    pub(crate) fn new(sheets: Vec<SheetTable>) -> Self {
        Self { sheets }
    }

    /// Worksheets in workbook order
    pub fn sheets(&self) -> &[SheetTable] {
        &self.sheets
    }

    /// Worksheet by position
    pub fn sheet(&self, index: usize) -> Option<&SheetTable> {
        self.sheets.get(index)
    }

    /// Worksheet by name, ignoring ASCII case and surrounding whitespace
    pub fn sheet_by_name(&self, name: &str) -> Option<&SheetTable> {
        let name = name.trim();
        self.sheets
            .iter()
            .find(|s| s.name.trim().eq_ignore_ascii_case(name))
    }

    /// Number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Take ownership of the worksheets
    pub fn into_sheets(self) -> Vec<SheetTable> {
        self.sheets
    }
}
