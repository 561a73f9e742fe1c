//! Conversion of tabular metadata records into the typed model.
//!
//! Metadata sheets are plain tables whose first row holds labels such as
//! `Field Name` or `Header Font Color`. Values that do not parse (widths,
//! sizes, colors, enum keywords) are ignored and the default applies.

use std::str::FromStr;

use ahash::AHashMap;

use super::{ColumnSpec, ReportSpec};
use crate::error::{Error, Result};
use crate::style::{Color, HorizontalAlignment};

/// One row of a metadata table, addressable by header label or position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    values: Vec<String>,
    index: AHashMap<String, usize>,
}

impl MetadataRecord {
    /// Pair a table's header labels with one of its rows
    pub fn new<S: AsRef<str>>(headers: &[S], values: Vec<String>) -> Self {
        let mut index = AHashMap::with_capacity(headers.len());
        for (pos, label) in headers.iter().enumerate() {
            let label = label.as_ref().trim();
            if !label.is_empty() {
                index.entry(label.to_string()).or_insert(pos);
            }
        }
        Self { values, index }
    }

    /// Build a record from `(label, value)` pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (headers, values): (Vec<&str>, Vec<String>) = pairs
            .into_iter()
            .map(|(label, value)| (label, value.to_string()))
            .unzip();
        Self::new(&headers, values)
    }

    /// Trimmed, non-blank value under a header label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.index
            .get(label)
            .and_then(|&pos| self.value_at(pos))
    }

    /// Trimmed, non-blank value at a column position
    pub fn value_at(&self, pos: usize) -> Option<&str> {
        self.values
            .get(pos)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Whether the table declares a header label at all
    pub fn has_label(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// `Report Name` of the record
    pub fn report_name(&self) -> Option<&str> {
        self.get("Report Name")
    }

    fn flag(&self, label: &str) -> bool {
        self.get(label)
            .is_some_and(|v| v.eq_ignore_ascii_case("y") || v.eq_ignore_ascii_case("yes"))
    }

    fn number(&self, label: &str) -> Option<f64> {
        let raw = self.get(label)?;
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                log::debug!("Ignoring non-numeric {label} '{raw}'");
                None
            }
        }
    }

    fn color(&self, label: &str) -> Option<Color> {
        let raw = self.get(label)?;
        let color = Color::from_hex(raw);
        if color.is_none() {
            log::debug!("Ignoring malformed {label} '{raw}'");
        }
        color
    }

    fn keyword<T: FromStr>(&self, label: &str) -> Option<T> {
        let raw = self.get(label)?;
        let parsed = raw.parse().ok();
        if parsed.is_none() {
            log::debug!("Ignoring unknown {label} '{raw}'");
        }
        parsed
    }

    fn text(&self, label: &str) -> Option<String> {
        self.get(label).map(str::to_string)
    }
}

impl ColumnSpec {
    /// Build a column declaration from a `Columns` table record
    pub fn from_record(record: &MetadataRecord) -> Result<Self> {
        let field_name = record
            .get("Field Name")
            .ok_or(Error::MissingAttribute("Field Name"))?;

        Ok(Self {
            field_name: field_name.to_string(),
            is_header: record.flag("Is Header"),
            number_format: record.text("Number Format"),
            column_width: record.number("Column Width").filter(|w| *w > 0.0),
            text_align: record.keyword::<HorizontalAlignment>("Text Align"),
            font_name: record.text("Font Name"),
            font_size: record.number("Font Size").filter(|s| *s > 0.0),
            font_bold: record.flag("Font Bold"),
            background_color: record.color("Background Color"),
            wrap_text: record.flag("Wrap Text"),
        })
    }
}

impl ReportSpec {
    /// Build a report from a `Reports` table record and its columns.
    ///
    /// The data source comes from the `CSV File` column, or from the second
    /// column when the table has no such label.
    pub fn from_record(record: &MetadataRecord, columns: Vec<ColumnSpec>) -> Self {
        let source = if record.has_label("CSV File") {
            record.text("CSV File")
        } else {
            record.value_at(1).map(str::to_string)
        };

        let print_pages_width = record
            .number("Print Pages Width")
            .map(f64::trunc)
            .filter(|n| *n >= 1.0 && *n <= u32::MAX as f64)
            .map_or(1, |n| n as u32);

        Self {
            name: record.report_name().unwrap_or_default().to_string(),
            source,
            title: record.text("Title").unwrap_or_default(),
            title_font_name: record.text("Font Name"),
            title_font_size: record.number("Font Size").filter(|s| *s > 0.0),
            title_bold: record.flag("Font Bold"),
            title_color: record.color("Font Color"),
            header_background_color: record.color("Header Background Color"),
            header_font_color: record.color("Header Font Color"),
            header_font_name: record.text("Header Font Name"),
            header_font_size: record.number("Header Font Size").filter(|s| *s > 0.0),
            header_font_bold: record.flag("Header Font Bold"),
            border_color: record.color("Border Color"),
            page_orientation: record.keyword("Page Orientation").unwrap_or_default(),
            print_pages_width,
            output_target: record.keyword("Output Target").unwrap_or_default(),
            heading_type: record.keyword("Heading Type").unwrap_or_default(),
            heading_totals: record.flag("Heading Totals"),
            columns,
        }
    }
}
