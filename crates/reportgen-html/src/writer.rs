//! HTML report writer

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::css::{escape_html, style_attr};
use reportgen_core::{Banner, PlanCell, PlanColumn, PlanNode, RenderPlan, ReportSpec};

const DOCUMENT_CSS: &str = "table { border-collapse: collapse; margin-bottom: 1em; }\n\
td, th { padding: 2px 4px; font-weight: normal; }\n\
@media print { table { margin-bottom: 0; } }";

/// HTML report writer.
///
/// The plan becomes one table; a `PageBreak` closes it and opens a new table
/// that starts on a fresh printed page.
pub struct HtmlWriter;

impl HtmlWriter {
    /// Write a report to a file path
    pub fn write_file<P: AsRef<Path>>(
        plan: &RenderPlan,
        spec: &ReportSpec,
        path: P,
    ) -> io::Result<()> {
        let file = File::create(path)?;
        Self::write(plan, spec, file)
    }

    /// Write a report to a writer
    pub fn write<W: Write>(plan: &RenderPlan, spec: &ReportSpec, writer: W) -> io::Result<()> {
        let html = Self::render(plan, spec);
        let mut out = BufWriter::new(writer);
        out.write_all(html.as_bytes())?;
        out.flush()?;
        log::debug!("Wrote HTML '{}' ({} bytes)", spec.name, html.len());
        Ok(())
    }

    /// Render a report as a complete HTML document
    pub fn render(plan: &RenderPlan, spec: &ReportSpec) -> String {
        let title = if spec.title.trim().is_empty() {
            &spec.name
        } else {
            &spec.title
        };
        let span = plan.column_count().max(1);

        let mut html = String::new();
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n",
            escape_html(title),
            DOCUMENT_CSS
        );

        open_table(&mut html, plan.columns(), false);
        for node in plan.nodes() {
            match node {
                PlanNode::Title(banner) | PlanNode::GroupCaption(banner) => {
                    banner_row(&mut html, banner, span)
                }
                PlanNode::HeaderRow(cells) => cell_row(&mut html, cells, "th"),
                PlanNode::DataRow(cells) | PlanNode::TotalsRow(cells) => {
                    cell_row(&mut html, cells, "td")
                }
                PlanNode::PageBreak => {
                    close_table(&mut html);
                    open_table(&mut html, plan.columns(), true);
                }
            }
        }
        close_table(&mut html);

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn open_table(html: &mut String, columns: &[PlanColumn], new_page: bool) {
    if new_page {
        html.push_str("<table style=\"break-before: page\">\n");
    } else {
        html.push_str("<table>\n");
    }

    html.push_str("<colgroup>");
    for column in columns {
        match column.width {
            Some(width) => {
                let _ = write!(html, "<col style=\"width: {}ch\">", width);
            }
            None => html.push_str("<col>"),
        }
    }
    html.push_str("</colgroup>\n");
}

fn close_table(html: &mut String) {
    html.push_str("</table>\n");
}

fn banner_row(html: &mut String, banner: &Banner, span: usize) {
    let _ = writeln!(
        html,
        "<tr><td colspan=\"{}\"{}>{}</td></tr>",
        span,
        style_attr(&banner.style),
        escape_html(&banner.text)
    );
}

fn cell_row(html: &mut String, cells: &[PlanCell], tag: &str) {
    html.push_str("<tr>");
    for cell in cells {
        let _ = write!(
            html,
            "<{tag}{}>{}</{tag}>",
            style_attr(&cell.style),
            escape_html(&cell.display)
        );
    }
    html.push_str("</tr>\n");
}
