//! Worksheet XML for a render plan

use crate::address::{cell_ref, range_ref};
use crate::styles::{escape_xml, XlsxStyleTable};
use reportgen_core::{Banner, CellValue, PlanCell, PlanNode, RenderPlan, ReportSpec};

const MAX_SHEET_NAME_LEN: usize = 31;

/// Worksheet name for a report: characters Excel rejects are dropped and the
/// result is cut to 31 characters.
pub fn sheet_name(report_name: &str) -> String {
    let cleaned: String = report_name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    if cleaned.is_empty() {
        "Report".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Rows, merges and manual breaks accumulated while walking the plan
struct SheetRows<'a> {
    styles: &'a XlsxStyleTable,
    last_col: u32,
    xml: String,
    /// 0-based index of the next row to write
    next_row: u32,
    merges: Vec<String>,
    /// 1-based numbers of rows followed by a manual page break
    breaks: Vec<u32>,
}

impl<'a> SheetRows<'a> {
    fn new(styles: &'a XlsxStyleTable, column_count: usize) -> Self {
        Self {
            styles,
            last_col: column_count.saturating_sub(1) as u32,
            xml: String::new(),
            next_row: 0,
            merges: Vec::new(),
            breaks: Vec::new(),
        }
    }

    /// A banner fills the first cell and is merged across every column
    fn banner(&mut self, banner: &Banner) {
        let row = self.next_row;
        let xf = self.styles.xf_id(&banner.style);
        self.open_row();
        write_text_cell(&mut self.xml, row, 0, xf, &banner.text);
        for col in 1..=self.last_col {
            write_empty_cell(&mut self.xml, row, col, xf);
        }
        self.close_row();

        if self.last_col > 0 {
            self.merges.push(range_ref(row, 0, row, self.last_col));
        }
    }

    fn cells(&mut self, cells: &[PlanCell]) {
        let row = self.next_row;
        self.open_row();
        for (col, cell) in cells.iter().enumerate() {
            let xf = self.styles.xf_id(&cell.style);
            let col = col as u32;
            match &cell.value {
                CellValue::Number(n) => {
                    let attr = style_attr(xf);
                    self.xml.push_str(&format!(
                        "\n            <c r=\"{}\"{}><v>{}</v></c>",
                        cell_ref(row, col),
                        attr,
                        n
                    ));
                }
                CellValue::Text(text) => write_text_cell(&mut self.xml, row, col, xf, text),
                CellValue::Empty => write_empty_cell(&mut self.xml, row, col, xf),
            }
        }
        self.close_row();
    }

    /// Break after the last written row; a break before any row is dropped
    fn page_break(&mut self) {
        if self.next_row > 0 && self.breaks.last() != Some(&self.next_row) {
            self.breaks.push(self.next_row);
        }
    }

    fn open_row(&mut self) {
        self.xml
            .push_str(&format!("\n        <row r=\"{}\">", self.next_row + 1));
    }

    fn close_row(&mut self) {
        self.xml.push_str("\n        </row>");
        self.next_row += 1;
    }
}

fn style_attr(xf: u32) -> String {
    if xf != 0 {
        format!(" s=\"{}\"", xf)
    } else {
        String::new()
    }
}

fn write_text_cell(xml: &mut String, row: u32, col: u32, xf: u32, text: &str) {
    let space = if text.trim() != text {
        " xml:space=\"preserve\""
    } else {
        ""
    };
    xml.push_str(&format!(
        "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t{}>{}</t></is></c>",
        cell_ref(row, col),
        style_attr(xf),
        space,
        escape_xml(text)
    ));
}

/// Style-only cells keep borders and fills on blank positions
fn write_empty_cell(xml: &mut String, row: u32, col: u32, xf: u32) {
    if xf != 0 {
        xml.push_str(&format!(
            "\n            <c r=\"{}\"{}/>",
            cell_ref(row, col),
            style_attr(xf)
        ));
    }
}

pub(crate) fn worksheet_xml(plan: &RenderPlan, spec: &ReportSpec, styles: &XlsxStyleTable) -> String {
    let mut rows = SheetRows::new(styles, plan.column_count());
    for node in plan.nodes() {
        match node {
            PlanNode::Title(banner) | PlanNode::GroupCaption(banner) => rows.banner(banner),
            PlanNode::HeaderRow(cells) | PlanNode::DataRow(cells) | PlanNode::TotalsRow(cells) => {
                rows.cells(cells)
            }
            PlanNode::PageBreak => rows.page_break(),
        }
    }

    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheetPr><pageSetUpPr fitToPage="1"/></sheetPr>"#,
    );

    if rows.next_row > 0 {
        content.push_str(&format!(
            "\n    <dimension ref=\"{}\"/>",
            range_ref(0, 0, rows.next_row - 1, rows.last_col)
        ));
    }

    let widths: Vec<(usize, f64)> = plan
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(idx, c)| c.width.map(|w| (idx, w)))
        .collect();
    if !widths.is_empty() {
        content.push_str("\n    <cols>");
        for (idx, width) in widths {
            content.push_str(&format!(
                "\n        <col min=\"{0}\" max=\"{0}\" width=\"{1}\" customWidth=\"1\"/>",
                idx + 1,
                width
            ));
        }
        content.push_str("\n    </cols>");
    }

    if rows.xml.is_empty() {
        content.push_str("\n    <sheetData/>");
    } else {
        content.push_str("\n    <sheetData>");
        content.push_str(&rows.xml);
        content.push_str("\n    </sheetData>");
    }

    if !rows.merges.is_empty() {
        content.push_str(&format!(
            "\n    <mergeCells count=\"{}\">",
            rows.merges.len()
        ));
        for range in &rows.merges {
            content.push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range));
        }
        content.push_str("\n    </mergeCells>");
    }

    content.push_str(
        "\n    <pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" header=\"0.3\" footer=\"0.3\"/>",
    );
    content.push_str(&format!(
        "\n    <pageSetup orientation=\"{}\" fitToWidth=\"{}\" fitToHeight=\"0\"/>",
        spec.page_orientation.as_str(),
        spec.print_pages_width
    ));

    if !rows.breaks.is_empty() {
        content.push_str(&format!(
            "\n    <rowBreaks count=\"{0}\" manualBreakCount=\"{0}\">",
            rows.breaks.len()
        ));
        for row in &rows.breaks {
            content.push_str(&format!(
                "\n        <brk id=\"{}\" max=\"16383\" man=\"1\"/>",
                row
            ));
        }
        content.push_str("\n    </rowBreaks>");
    }

    content.push_str("\n</worksheet>");
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name() {
        assert_eq!(sheet_name("Employee Survey"), "Employee Survey");
        assert_eq!(sheet_name("Q1/Q2 [draft]?"), "Q1Q2 draft");
        assert_eq!(sheet_name("   "), "Report");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }
}
