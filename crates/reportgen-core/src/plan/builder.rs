//! Render plan construction

use super::{Banner, PlanCell, PlanColumn, PlanNode, RenderPlan, StyleSheet};
use crate::classify::ClassifiedFields;
use crate::format::{format_value, NumberFormatCode};
use crate::grouping::Group;
use crate::metadata::{HeadingType, ReportSpec};
use crate::value::{CellValue, DataRow};

/// Label in the first cell of every totals row
pub const TOTALS_LABEL: &str = "Totals";

/// Turns sorted groups into a [`RenderPlan`]
pub struct PlanBuilder<'s> {
    spec: &'s ReportSpec,
    fields: &'s ClassifiedFields<'s>,
    styles: StyleSheet,
    /// Parsed number format per data column
    codes: Vec<Option<NumberFormatCode>>,
}

impl<'s> PlanBuilder<'s> {
    /// Prepare a builder; styles are resolved once here
    pub fn new(spec: &'s ReportSpec, fields: &'s ClassifiedFields<'s>) -> Self {
        let codes = fields
            .data_columns()
            .iter()
            .map(|c| c.number_format().and_then(NumberFormatCode::parse))
            .collect();

        Self {
            spec,
            fields,
            styles: StyleSheet::resolve(spec, fields),
            codes,
        }
    }

    /// Convenience for `PlanBuilder::new(spec, fields).build_groups(groups)`
    pub fn build(
        spec: &'s ReportSpec,
        fields: &'s ClassifiedFields<'s>,
        groups: &[Group<'_>],
    ) -> RenderPlan {
        Self::new(spec, fields).build_groups(groups)
    }

    /// Resolved styles used by this builder
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Emit the plan for `groups` (already sorted)
    pub fn build_groups(&self, groups: &[Group<'_>]) -> RenderPlan {
        let page_mode = self.spec.heading_type == HeadingType::Page;
        let captions = self.spec.heading_type != HeadingType::None;
        let mut nodes = Vec::new();

        if !self.spec.title.trim().is_empty() {
            nodes.push(PlanNode::Title(Banner {
                text: self.spec.title.clone(),
                style: self.styles.title.clone(),
            }));
        }

        // In page mode each group carries its own header row; an empty report
        // still shows the labels once.
        if !page_mode || groups.is_empty() {
            nodes.push(self.header_row());
        }

        for (idx, group) in groups.iter().enumerate() {
            if page_mode && idx > 0 {
                nodes.push(PlanNode::PageBreak);
            }

            if captions {
                if let Some(caption) = group.visible_caption() {
                    nodes.push(PlanNode::GroupCaption(Banner {
                        text: caption.to_string(),
                        style: self.styles.caption.clone(),
                    }));
                }
            }

            if page_mode {
                nodes.push(self.header_row());
            }

            let mut sums = vec![0.0; self.codes.len()];
            for row in group.rows() {
                let cells = self.data_cells(row);
                for (sum, cell) in sums.iter_mut().zip(&cells) {
                    if let CellValue::Number(n) = cell.value {
                        *sum += n;
                    }
                }
                nodes.push(PlanNode::DataRow(cells));
            }

            if self.spec.heading_totals {
                nodes.push(self.totals_row(&sums));
            }
        }

        let columns = self
            .fields
            .data_columns()
            .iter()
            .map(|c| PlanColumn {
                field: c.field_name.clone(),
                width: c.column_width,
            })
            .collect();

        RenderPlan::new(columns, nodes)
    }

    fn header_row(&self) -> PlanNode {
        PlanNode::HeaderRow(
            self.fields
                .data_columns()
                .iter()
                .map(|c| PlanCell::text(c.field_name.clone(), self.styles.header.clone()))
                .collect(),
        )
    }

    fn data_cells(&self, row: &DataRow) -> Vec<PlanCell> {
        self.fields
            .data_columns()
            .iter()
            .zip(&self.styles.data)
            .map(|(column, style)| {
                let formatted = format_value(row.get(&column.field_name), column.number_format());
                PlanCell {
                    value: formatted.value,
                    display: formatted.display,
                    style: style.clone(),
                }
            })
            .collect()
    }

    /// `"Totals"` first, sums under numerically formatted fields, blanks
    /// elsewhere.
    fn totals_row(&self, sums: &[f64]) -> PlanNode {
        let cells = self
            .codes
            .iter()
            .zip(sums)
            .zip(&self.styles.totals)
            .enumerate()
            .map(|(idx, ((code, sum), style))| {
                if idx == 0 {
                    return PlanCell::text(TOTALS_LABEL, style.clone());
                }
                match code {
                    // An overflowing sum has no cell representation
                    Some(code) if sum.is_finite() => PlanCell {
                        value: CellValue::Number(*sum),
                        display: code.display_numeric(*sum),
                        style: style.clone(),
                    },
                    _ => PlanCell::blank(style.clone()),
                }
            })
            .collect();
        PlanNode::TotalsRow(cells)
    }
}
