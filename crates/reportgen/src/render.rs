//! Output adapters behind one interface

use std::fs::File;

use reportgen_core::{OutputTarget, RenderPlan, ReportSpec};
use reportgen_html::HtmlWriter;
use reportgen_pdf::PdfWriter;
use reportgen_xlsx::XlsxWriter;

use crate::error::Result;

/// Renders a plan into an open document file
pub trait DocumentRenderer {
    /// Kind of document produced
    fn target(&self) -> OutputTarget;

    /// Write the whole document; the caller owns and finalizes `file`
    fn render(&self, plan: &RenderPlan, spec: &ReportSpec, file: &mut File) -> Result<()>;
}

/// Spreadsheet workbook output
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

impl DocumentRenderer for XlsxRenderer {
    fn target(&self) -> OutputTarget {
        OutputTarget::Xlsx
    }

    fn render(&self, plan: &RenderPlan, spec: &ReportSpec, file: &mut File) -> Result<()> {
        XlsxWriter::write(plan, spec, file)?;
        Ok(())
    }
}

/// Paginated PDF output
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl DocumentRenderer for PdfRenderer {
    fn target(&self) -> OutputTarget {
        OutputTarget::Pdf
    }

    fn render(&self, plan: &RenderPlan, spec: &ReportSpec, file: &mut File) -> Result<()> {
        PdfWriter::write(plan, spec, file)?;
        Ok(())
    }
}

/// Standalone HTML output
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl DocumentRenderer for HtmlRenderer {
    fn target(&self) -> OutputTarget {
        OutputTarget::Html
    }

    fn render(&self, plan: &RenderPlan, spec: &ReportSpec, file: &mut File) -> Result<()> {
        HtmlWriter::write(plan, spec, file)?;
        Ok(())
    }
}

/// Renderer for an output target
pub fn renderer_for(target: OutputTarget) -> Box<dyn DocumentRenderer> {
    match target {
        OutputTarget::Xlsx => Box::new(XlsxRenderer),
        OutputTarget::Pdf => Box::new(PdfRenderer),
        OutputTarget::Html => Box::new(HtmlRenderer),
    }
}
