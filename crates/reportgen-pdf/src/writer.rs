//! PDF report writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect, Rgb,
};

use crate::error::{PdfError, PdfResult};
use crate::layout::{Block, DocumentLayout, PageGeometry};
use reportgen_core::{Color, RenderPlan, ReportSpec};

const PT_TO_MM: f64 = 25.4 / 72.0;
const LAYER_NAME: &str = "Layer 1";
const BORDER_WIDTH: f32 = 1.0;

fn mm(points: f64) -> Mm {
    Mm((points * PT_TO_MM) as f32)
}

fn pdf_color(color: Color) -> printpdf::Color {
    let (r, g, b) = color.to_unit_rgb();
    printpdf::Color::Rgb(Rgb::new(r, g, b, None))
}

fn pdf_error(err: impl std::fmt::Display) -> PdfError {
    PdfError::Render(err.to_string())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// PDF report writer.
///
/// Lays the plan out on A4 pages in the report's orientation and draws every
/// cell as a bordered box with Helvetica text. Rows that do not fit move to a
/// new page; `PageBreak` nodes always start one.
pub struct PdfWriter;

impl PdfWriter {
    /// Write a report to a file path
    pub fn write_file<P: AsRef<Path>>(
        plan: &RenderPlan,
        spec: &ReportSpec,
        path: P,
    ) -> PdfResult<()> {
        let file = File::create(path)?;
        Self::write(plan, spec, file)
    }

    /// Write a report to a writer
    pub fn write<W: Write>(plan: &RenderPlan, spec: &ReportSpec, writer: W) -> PdfResult<()> {
        let geometry = PageGeometry::a4(spec.page_orientation);
        let layout = DocumentLayout::build(plan, geometry)?;

        let title = if spec.title.trim().is_empty() {
            spec.name.as_str()
        } else {
            spec.title.as_str()
        };
        let (doc, first_page, first_layer) = PdfDocument::new(
            title,
            mm(geometry.width),
            mm(geometry.height),
            LAYER_NAME,
        );
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
        };

        for (index, page) in layout.pages.iter().enumerate() {
            let (page_idx, layer_idx) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(mm(geometry.width), mm(geometry.height), LAYER_NAME)
            };
            let layer = doc.get_page(page_idx).get_layer(layer_idx);
            for block in &page.blocks {
                draw_block(&layer, block, geometry.height, &fonts);
            }
        }

        let mut out = BufWriter::new(writer);
        doc.save(&mut out).map_err(pdf_error)?;
        out.flush()?;

        log::debug!(
            "Wrote PDF '{}' with {} pages",
            spec.name,
            layout.page_count()
        );
        Ok(())
    }
}

/// Fill, then border, then text
fn draw_block(layer: &PdfLayerReference, block: &Block, page_height: f64, fonts: &Fonts) {
    let top = page_height - block.y;
    let bottom = top - block.height;
    let left = block.x;
    let right = block.x + block.width;

    if let Some(fill) = block.fill {
        layer.set_fill_color(pdf_color(fill));
        layer.add_rect(Rect::new(mm(left), mm(bottom), mm(right), mm(top)));
    }

    if let Some(stroke) = block.stroke {
        layer.set_outline_color(pdf_color(stroke));
        layer.set_outline_thickness(BORDER_WIDTH);
        layer.add_line(Line {
            points: vec![
                (Point::new(mm(left), mm(top)), false),
                (Point::new(mm(right), mm(top)), false),
                (Point::new(mm(right), mm(bottom)), false),
                (Point::new(mm(left), mm(bottom)), false),
            ],
            is_closed: true,
        });
    }

    let font = if block.bold { &fonts.bold } else { &fonts.regular };
    layer.set_fill_color(pdf_color(block.color));
    for run in block.lines.iter().filter(|r| !r.text.is_empty()) {
        layer.use_text(
            run.text.as_str(),
            block.font_size as f32,
            mm(run.x),
            mm(page_height - run.baseline),
            font,
        );
    }
}
