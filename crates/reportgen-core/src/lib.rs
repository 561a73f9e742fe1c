//! # reportgen-core
//!
//! Core data structures and algorithms for the reportgen report engine.
//!
//! This crate provides everything that is independent of the output format:
//! - [`ReportSpec`] and [`ColumnSpec`] - Report definitions read from metadata
//! - [`format_value`] - Number format codes applied to raw values
//! - [`FieldClassifier`] - Header (grouping) vs data (displayed) fields
//! - [`GroupingEngine`] - Sorted, captioned groups of rows
//! - [`PlanBuilder`] and [`RenderPlan`] - Backend-neutral layout instructions
//!
//! ## Example
//!
//! ```rust
//! use reportgen_core::{
//!     ColumnSpec, DataRow, FieldClassifier, GroupingEngine, NodeKind, PlanBuilder, ReportSpec,
//! };
//!
//! let spec = ReportSpec::new("Sales")
//!     .with_column(ColumnSpec::header("Region"))
//!     .with_column(ColumnSpec::new("Amount").with_number_format("$#,###"));
//!
//! let rows = vec![
//!     DataRow::from_pairs([("Region", "West"), ("Amount", "1200")]),
//!     DataRow::from_pairs([("Region", "East"), ("Amount", "800")]),
//! ];
//!
//! let fields = FieldClassifier::classify(&spec);
//! let groups = GroupingEngine::group(&rows, fields.header_columns());
//! let plan = PlanBuilder::build(&spec, &fields, &groups);
//!
//! assert_eq!(plan.count(NodeKind::GroupCaption), 2);
//! ```

pub mod classify;
pub mod error;
pub mod format;
pub mod grouping;
pub mod metadata;
pub mod plan;
pub mod style;
pub mod value;

pub use classify::{ClassifiedFields, FieldClassifier};
pub use error::{Error, Result};
pub use format::{format_value, FormattedValue, NumberFormatCode};
pub use grouping::{Group, GroupingEngine, CAPTION_SEPARATOR};
pub use metadata::{
    ColumnSpec, HeadingType, MetadataRecord, OutputTarget, PageOrientation, ReportSpec,
};
pub use plan::{
    Banner, NodeKind, PlanBuilder, PlanCell, PlanColumn, PlanNode, RenderPlan, StyleSheet,
    TOTALS_LABEL,
};
pub use style::{
    Alignment, Color, FontStyle, HorizontalAlignment, ResolvedStyle, VerticalAlignment,
};
pub use value::{flatten_line_breaks, CellValue, DataRow, RawValue};

/// Group rows and build the render plan of `spec` in one step.
///
/// The spec is validated first: duplicate field names and reports without
/// data fields are rejected.
pub fn build_plan(spec: &ReportSpec, rows: &[DataRow]) -> Result<RenderPlan> {
    spec.validate()?;
    let fields = FieldClassifier::classify(spec);
    let groups = GroupingEngine::group(rows, fields.header_columns());
    log::debug!(
        "Report '{}': {} header fields, {} data fields, {} groups",
        spec.name,
        fields.header_columns().len(),
        fields.data_columns().len(),
        groups.len()
    );
    Ok(PlanBuilder::build(spec, &fields, &groups))
}
