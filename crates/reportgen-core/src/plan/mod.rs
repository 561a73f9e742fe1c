//! Backend-neutral render plans
//!
//! A [`RenderPlan`] is the ordered list of layout instructions every output
//! adapter consumes. It decides sequence, content and semantic style; page
//! geometry and pixel positions are left to the adapters.

mod builder;
mod stylesheet;

pub use builder::{PlanBuilder, TOTALS_LABEL};
pub use stylesheet::StyleSheet;

use crate::style::ResolvedStyle;
use crate::value::CellValue;

/// One displayed column of the plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanColumn {
    /// Field name (also the header label)
    pub field: String,
    /// Width in character units; `None` keeps the backend default
    pub width: Option<f64>,
}

/// One cell of a row node
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCell {
    /// Typed value for numeric storage
    pub value: CellValue,
    /// Text shown to readers
    pub display: String,
    /// Fully resolved style
    pub style: ResolvedStyle,
}

impl PlanCell {
    /// A text cell whose value and display coincide
    pub fn text<S: Into<String>>(text: S, style: ResolvedStyle) -> Self {
        let text = text.into();
        Self {
            value: CellValue::Text(text.clone()),
            display: text,
            style,
        }
    }

    /// A cell with no content
    pub fn blank(style: ResolvedStyle) -> Self {
        Self {
            value: CellValue::Empty,
            display: String::new(),
            style,
        }
    }
}

/// Text spanning every data column (title, group caption)
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub style: ResolvedStyle,
}

/// A layout instruction
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    /// Report title
    Title(Banner),
    /// Column labels
    HeaderRow(Vec<PlanCell>),
    /// Group caption
    GroupCaption(Banner),
    /// One source record
    DataRow(Vec<PlanCell>),
    /// Start a new page
    PageBreak,
    /// Per-group sums
    TotalsRow(Vec<PlanCell>),
}

/// Discriminant of a [`PlanNode`], handy for layout assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Title,
    HeaderRow,
    GroupCaption,
    DataRow,
    PageBreak,
    TotalsRow,
}

impl PlanNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            PlanNode::Title(_) => NodeKind::Title,
            PlanNode::HeaderRow(_) => NodeKind::HeaderRow,
            PlanNode::GroupCaption(_) => NodeKind::GroupCaption,
            PlanNode::DataRow(_) => NodeKind::DataRow,
            PlanNode::PageBreak => NodeKind::PageBreak,
            PlanNode::TotalsRow(_) => NodeKind::TotalsRow,
        }
    }

    /// Cells of row-shaped nodes
    pub fn cells(&self) -> Option<&[PlanCell]> {
        match self {
            PlanNode::HeaderRow(cells) | PlanNode::DataRow(cells) | PlanNode::TotalsRow(cells) => {
                Some(cells)
            }
            _ => None,
        }
    }
}

/// Ordered layout instructions plus the displayed columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPlan {
    columns: Vec<PlanColumn>,
    nodes: Vec<PlanNode>,
}

impl RenderPlan {
    pub(crate) fn new(columns: Vec<PlanColumn>, nodes: Vec<PlanNode>) -> Self {
        Self { columns, nodes }
    }

    /// Displayed columns, left to right
    pub fn columns(&self) -> &[PlanColumn] {
        &self.columns
    }

    /// Number of displayed columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Layout instructions in emission order
    pub fn nodes(&self) -> &[PlanNode] {
        &self.nodes
    }

    /// Node kinds in emission order
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.nodes.iter().map(PlanNode::kind).collect()
    }

    /// Number of nodes of one kind
    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind() == kind).count()
    }
}
