//! Report metadata model
//!
//! A report is described by one [`ReportSpec`] (report-level styling and
//! layout options) holding its ordered [`ColumnSpec`]s. Declaration order is
//! load-bearing: it fixes the left-to-right column order in every output and
//! the precedence of header fields when grouping.

mod record;

pub use record::MetadataRecord;

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::style::{Color, HorizontalAlignment};

/// One declared field of a report
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSpec {
    /// Unique key within the report; also the column's display label
    pub field_name: String,
    /// Used for grouping only, never rendered as a data column
    pub is_header: bool,
    /// Number format code (percentage, currency, decimal, ...)
    pub number_format: Option<String>,
    /// Column width in character units
    pub column_width: Option<f64>,
    /// Horizontal alignment; left when unset
    pub text_align: Option<HorizontalAlignment>,
    /// Font family
    pub font_name: Option<String>,
    /// Font size in points
    pub font_size: Option<f64>,
    /// Bold font
    pub font_bold: bool,
    /// Cell background
    pub background_color: Option<Color>,
    /// Wrap long text
    pub wrap_text: bool,
}

impl ColumnSpec {
    /// Create a data column with default styling
    pub fn new<S: Into<String>>(field_name: S) -> Self {
        Self {
            field_name: field_name.into(),
            ..Default::default()
        }
    }

    /// Create a header (grouping) column with default styling
    pub fn header<S: Into<String>>(field_name: S) -> Self {
        Self {
            is_header: true,
            ..Self::new(field_name)
        }
    }

    /// Set the number format code
    pub fn with_number_format<S: Into<String>>(mut self, code: S) -> Self {
        self.number_format = Some(code.into());
        self
    }

    /// Set the column width
    pub fn with_width(mut self, width: f64) -> Self {
        self.column_width = Some(width);
        self
    }

    /// Number format code, ignoring blank values
    pub fn number_format(&self) -> Option<&str> {
        self.number_format
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Page orientation for paginated output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageOrientation::Portrait => "portrait",
            PageOrientation::Landscape => "landscape",
        }
    }
}

impl FromStr for PageOrientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(PageOrientation::Portrait),
            "landscape" => Ok(PageOrientation::Landscape),
            other => Err(Error::other(format!("Unknown page orientation: {other}"))),
        }
    }
}

/// Output document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputTarget {
    /// Spreadsheet workbook
    #[default]
    Xlsx,
    /// Paginated document
    Pdf,
    /// Markup table
    Html,
}

impl OutputTarget {
    /// File extension (without dot) for documents of this kind
    pub fn extension(&self) -> &'static str {
        match self {
            OutputTarget::Xlsx => "xlsx",
            OutputTarget::Pdf => "pdf",
            OutputTarget::Html => "html",
        }
    }
}

impl FromStr for OutputTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XLSX" | "EXCEL" => Ok(OutputTarget::Xlsx),
            "PDF" => Ok(OutputTarget::Pdf),
            "HTML" | "HTM" => Ok(OutputTarget::Html),
            other => Err(Error::other(format!("Unknown output target: {other}"))),
        }
    }
}

/// How group captions interact with the page flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeadingType {
    /// No caption rows
    None,
    /// Inline caption row before each group
    #[default]
    Group,
    /// Each group starts a new page with its own caption and header row
    Page,
}

impl FromStr for HeadingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(HeadingType::None),
            "GROUP" => Ok(HeadingType::Group),
            "PAGE" => Ok(HeadingType::Page),
            other => Err(Error::other(format!("Unknown heading type: {other}"))),
        }
    }
}

/// Report-level configuration plus the ordered column declarations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportSpec {
    /// Report name as used for lookup and output file naming
    pub name: String,
    /// Data source reference (file path) declared in metadata
    pub source: Option<String>,
    /// Title banner text; empty means no title row
    pub title: String,
    pub title_font_name: Option<String>,
    pub title_font_size: Option<f64>,
    pub title_bold: bool,
    pub title_color: Option<Color>,
    pub header_background_color: Option<Color>,
    pub header_font_color: Option<Color>,
    pub header_font_name: Option<String>,
    pub header_font_size: Option<f64>,
    pub header_font_bold: bool,
    /// Thin borders around table cells when set
    pub border_color: Option<Color>,
    pub page_orientation: PageOrientation,
    /// Fit-to-width page count for printing
    pub print_pages_width: u32,
    pub output_target: OutputTarget,
    pub heading_type: HeadingType,
    /// Emit a totals row after each group
    pub heading_totals: bool,
    /// Ordered column declarations
    pub columns: Vec<ColumnSpec>,
}

impl ReportSpec {
    /// Create a report with default options and no columns
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            print_pages_width: 1,
            ..Default::default()
        }
    }

    /// Append a column declaration
    pub fn with_column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Look up a column by field name
    pub fn column(&self, field_name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.field_name == field_name)
    }

    /// Check the model invariants: unique field names and at least one
    /// displayed (non-header) field.
    pub fn validate(&self) -> Result<()> {
        for (idx, column) in self.columns.iter().enumerate() {
            if self.columns[..idx]
                .iter()
                .any(|c| c.field_name == column.field_name)
            {
                return Err(Error::DuplicateField {
                    report: self.name.clone(),
                    field: column.field_name.clone(),
                });
            }
        }

        if !self.columns.iter().any(|c| !c.is_header) {
            return Err(Error::NoDataFields(self.name.clone()));
        }
        Ok(())
    }
}
