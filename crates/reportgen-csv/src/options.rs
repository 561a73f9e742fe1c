//! CSV options

/// Options for reading CSV data sources
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Trim whitespace around labels and values
    pub trim: bool,
    /// Replace runs of CR/LF inside values with a single space
    pub flatten_newlines: bool,
    /// Drop rows whose values are all blank
    pub skip_blank_rows: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: true,
            flatten_newlines: true,
            skip_blank_rows: true,
        }
    }
}

impl CsvReadOptions {
    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}
