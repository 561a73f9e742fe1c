//! Raw and formatted cell values, and the data rows the engine consumes

use std::borrow::Cow;
use std::fmt;

use ahash::AHashMap;

/// A value as delivered by a data source
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// Missing or blank field
    #[default]
    Empty,
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
}

impl RawValue {
    /// Create a text value; blank strings are kept as text
    pub fn text<S: Into<String>>(s: S) -> Self {
        RawValue::Text(s.into())
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    /// True for `Empty` and for whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Number(_) => false,
        }
    }

    /// Textual form of the value (empty string for `Empty`)
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Empty => Cow::Borrowed(""),
            RawValue::Text(s) => Cow::Borrowed(s.as_str()),
            RawValue::Number(n) => Cow::Owned(number_to_string(*n)),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// A typed value ready to be stored in an output cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value
    #[default]
    Empty,
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&RawValue> for CellValue {
    fn from(raw: &RawValue) -> Self {
        match raw {
            RawValue::Empty => CellValue::Empty,
            RawValue::Text(s) => CellValue::Text(s.clone()),
            RawValue::Number(n) => CellValue::Number(*n),
        }
    }
}

/// Render a number the way a plain `String(n)` would: integers without a
/// fractional part, everything else in shortest round-trip form.
pub fn number_to_string(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Replace every run of CR/LF characters with a single space
pub fn flatten_line_breaks(s: &str) -> Cow<'_, str> {
    if !s.contains(|c| c == '\r' || c == '\n') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut in_break = false;
    for c in s.chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
        } else {
            out.push(c);
            in_break = false;
        }
    }
    Cow::Owned(out)
}

static EMPTY: RawValue = RawValue::Empty;

/// One source record: field name to raw value.
///
/// Rows are immutable once handed to the engine; formatting always works on
/// copies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataRow {
    values: AHashMap<String, RawValue>,
}

impl DataRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(field, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a field value
    pub fn insert<K: Into<String>, V: Into<RawValue>>(&mut self, field: K, value: V) {
        self.values.insert(field.into(), value.into());
    }

    /// Value of a field; missing fields read as [`RawValue::Empty`]
    pub fn get(&self, field: &str) -> &RawValue {
        self.values.get(field).unwrap_or(&EMPTY)
    }

    /// True when every field is blank
    pub fn is_blank(&self) -> bool {
        self.values.values().all(RawValue::is_blank)
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(field, value)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-3.5), "-3.5");
        assert_eq!(number_to_string(0.1), "0.1");
    }

    #[test]
    fn test_flatten_line_breaks() {
        assert_eq!(flatten_line_breaks("one\r\n\ntwo\nthree"), "one two three");
        assert!(matches!(flatten_line_breaks("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_missing_field_reads_empty() {
        let row = DataRow::from_pairs([("A", "1")]);
        assert_eq!(row.get("A"), &RawValue::text("1"));
        assert!(row.get("B").is_empty());
    }

    #[test]
    fn test_blank_row() {
        let row = DataRow::from_pairs([("A", " "), ("B", "")]);
        assert!(row.is_blank());
        let row = DataRow::from_pairs([("A", RawValue::Number(0.0))]);
        assert!(!row.is_blank());
    }
}
