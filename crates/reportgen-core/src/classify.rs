//! Partitioning of column declarations into header (grouping) fields and
//! data (displayed) fields

use crate::metadata::{ColumnSpec, ReportSpec};

/// The two ordered partitions of a report's columns.
///
/// Both partitions keep declaration order: data field order is the column
/// order of every output, header field order is the precedence used for
/// group keys and captions.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFields<'a> {
    header: Vec<&'a ColumnSpec>,
    data: Vec<&'a ColumnSpec>,
}

impl<'a> ClassifiedFields<'a> {
    /// Header (grouping) columns in declaration order
    pub fn header_columns(&self) -> &[&'a ColumnSpec] {
        &self.header
    }

    /// Data (displayed) columns in declaration order
    pub fn data_columns(&self) -> &[&'a ColumnSpec] {
        &self.data
    }

    /// Header field names in declaration order
    pub fn header_fields(&self) -> Vec<&'a str> {
        self.header.iter().map(|c| c.field_name.as_str()).collect()
    }

    /// Data field names in declaration order
    pub fn data_fields(&self) -> Vec<&'a str> {
        self.data.iter().map(|c| c.field_name.as_str()).collect()
    }

    /// The first header column, whose styling drives caption rows
    pub fn primary_header(&self) -> Option<&'a ColumnSpec> {
        self.header.first().copied()
    }
}

/// Splits a report's columns on [`ColumnSpec::is_header`]
pub struct FieldClassifier;

impl FieldClassifier {
    /// Classify the columns of `spec`; filter-only and order-preserving
    pub fn classify(spec: &ReportSpec) -> ClassifiedFields<'_> {
        let (header, data): (Vec<_>, Vec<_>) = spec.columns.iter().partition(|c| c.is_header);
        ClassifiedFields { header, data }
    }
}
