//! Page layout for a render plan
//!
//! Positions are in points measured from the top-left corner of the page;
//! the writer flips them into PDF's bottom-left coordinate space.

use crate::error::{PdfError, PdfResult};
use crate::metrics::{line_height, text_width, wrap_text};
use reportgen_core::{
    Banner, Color, HorizontalAlignment, PageOrientation, PlanCell, PlanColumn, PlanNode,
    RenderPlan, ResolvedStyle,
};

/// A4 width in points
pub const A4_WIDTH: f64 = 595.28;
/// A4 height in points
pub const A4_HEIGHT: f64 = 841.89;
/// Margin on every side, in points
pub const PAGE_MARGIN: f64 = 72.0;
/// Inset of text from the cell border
pub const CELL_PADDING: f64 = 2.0;
/// Font size used when the style leaves it open
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
/// Column width in characters when the metadata leaves it open
pub const DEFAULT_COLUMN_CHARS: f64 = 10.0;
/// Points per character of column width
pub const POINTS_PER_CHAR: f64 = 7.0;

const ASCENT: f64 = 0.718;

/// Paper size and margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageGeometry {
    /// A4 in the given orientation with the standard margins
    pub fn a4(orientation: PageOrientation) -> Self {
        let (width, height) = match orientation {
            PageOrientation::Portrait => (A4_WIDTH, A4_HEIGHT),
            PageOrientation::Landscape => (A4_HEIGHT, A4_WIDTH),
        };
        Self {
            width,
            height,
            margin: PAGE_MARGIN,
        }
    }

    /// Width between the left and right margins
    pub fn printable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a block may reach
    pub fn bottom(&self) -> f64 {
        self.height - self.margin
    }
}

/// Column widths in points; shrunk proportionally when the table is wider
/// than the printable area
pub fn column_widths(columns: &[PlanColumn], printable_width: f64) -> Vec<f64> {
    let widths: Vec<f64> = columns
        .iter()
        .map(|c| c.width.unwrap_or(DEFAULT_COLUMN_CHARS) * POINTS_PER_CHAR)
        .collect();
    let total: f64 = widths.iter().sum();
    if total > printable_width && total > 0.0 {
        let scale = printable_width / total;
        widths.into_iter().map(|w| w * scale).collect()
    } else {
        widths
    }
}

/// One positioned line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub baseline: f64,
}

/// A rectangle with optional fill and border, and the text inside it
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub font_size: f64,
    pub bold: bool,
    pub color: Color,
    pub lines: Vec<TextRun>,
}

impl Block {
    /// All text of the block, lines joined by spaces
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Blocks of one page in drawing order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub blocks: Vec<Block>,
}

/// Every page of a laid out report
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl DocumentLayout {
    /// Lay out `plan` on pages of the given geometry
    pub fn build(plan: &RenderPlan, geometry: PageGeometry) -> PdfResult<Self> {
        if plan.column_count() == 0 {
            return Err(PdfError::NoColumns);
        }

        let widths = column_widths(plan.columns(), geometry.printable_width());
        let mut paginator = Paginator::new(geometry, widths);
        for node in plan.nodes() {
            match node {
                PlanNode::Title(banner) => paginator.banner(banner, false),
                PlanNode::GroupCaption(banner) => paginator.banner(banner, true),
                PlanNode::HeaderRow(cells) | PlanNode::DataRow(cells) | PlanNode::TotalsRow(cells) => {
                    paginator.row(cells)
                }
                PlanNode::PageBreak => paginator.page_break(),
            }
        }

        Ok(Self {
            geometry,
            pages: paginator.finish(),
        })
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Running cursor over a sequence of pages
struct Paginator {
    geometry: PageGeometry,
    widths: Vec<f64>,
    table_width: f64,
    pages: Vec<Page>,
    current: Page,
    y: f64,
}

impl Paginator {
    fn new(geometry: PageGeometry, widths: Vec<f64>) -> Self {
        let table_width = widths.iter().sum();
        Self {
            geometry,
            widths,
            table_width,
            pages: Vec::new(),
            current: Page::default(),
            y: geometry.margin,
        }
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = self.geometry.margin;
    }

    /// Breaks on an empty page are ignored
    fn page_break(&mut self) {
        if !self.current.blocks.is_empty() {
            self.new_page();
        }
    }

    fn ensure_space(&mut self, height: f64) {
        if self.y + height > self.geometry.bottom() && !self.current.blocks.is_empty() {
            self.new_page();
        }
    }

    fn banner(&mut self, banner: &Banner, bordered: bool) {
        let stroke = bordered.then(|| banner.style.border.unwrap_or(Color::BLACK));
        let cell = Cell::new(&banner.text, &banner.style, self.table_width);
        self.ensure_space(cell.height);
        let block = cell.place(self.geometry.margin, self.y, stroke);
        self.y += block.height;
        self.current.blocks.push(block);
    }

    fn row(&mut self, cells: &[PlanCell]) {
        let laid: Vec<Cell<'_>> = cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, &width)| Cell::new(&cell.display, &cell.style, width))
            .collect();
        let height = laid.iter().map(|c| c.height).fold(0.0, f64::max);
        self.ensure_space(height);

        let mut x = self.geometry.margin;
        for mut cell in laid {
            cell.height = height;
            let stroke = Some(cell.style.border.unwrap_or(Color::BLACK));
            let block = cell.place(x, self.y, stroke);
            x += block.width;
            self.current.blocks.push(block);
        }
        self.y += height;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.blocks.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

/// Text wrapped to a cell width, not yet positioned
struct Cell<'a> {
    style: &'a ResolvedStyle,
    width: f64,
    height: f64,
    size: f64,
    lines: Vec<String>,
}

impl<'a> Cell<'a> {
    fn new(text: &str, style: &'a ResolvedStyle, width: f64) -> Self {
        let size = style.font.size_or(DEFAULT_FONT_SIZE);
        let lines = wrap_text(text, width - 2.0 * CELL_PADDING, size, style.font.bold);
        let height = lines.len() as f64 * line_height(size) + 2.0 * CELL_PADDING;
        Self {
            style,
            width,
            height,
            size,
            lines,
        }
    }

    fn place(self, x: f64, y: f64, stroke: Option<Color>) -> Block {
        let bold = self.style.font.bold;
        let lh = line_height(self.size);
        let lines = self
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let line_width = text_width(&text, self.size, bold);
                let offset = match self.style.alignment.horizontal {
                    HorizontalAlignment::Left => CELL_PADDING,
                    HorizontalAlignment::Center => (self.width - line_width) / 2.0,
                    HorizontalAlignment::Right => self.width - CELL_PADDING - line_width,
                };
                TextRun {
                    text,
                    x: x + offset,
                    baseline: y + CELL_PADDING + lh * i as f64 + self.size * ASCENT,
                }
            })
            .collect();

        Block {
            x,
            y,
            width: self.width,
            height: self.height,
            fill: self.style.fill,
            stroke,
            font_size: self.size,
            bold,
            color: self.style.font.color.unwrap_or(Color::BLACK),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column(width: Option<f64>) -> PlanColumn {
        PlanColumn {
            field: "F".into(),
            width,
        }
    }

    #[test]
    fn test_a4_geometry() {
        let portrait = PageGeometry::a4(PageOrientation::Portrait);
        let landscape = PageGeometry::a4(PageOrientation::Landscape);
        assert_eq!(portrait.width, landscape.height);
        assert!((portrait.printable_width() - 451.28).abs() < 1e-9);
        assert!((landscape.bottom() - (A4_WIDTH - 72.0)).abs() < 1e-9);
    }

    #[test]
    fn test_column_widths_default_and_explicit() {
        let widths = column_widths(&[column(None), column(Some(20.0))], 451.28);
        assert_eq!(widths, vec![70.0, 140.0]);
    }

    #[test]
    fn test_column_widths_scaled_to_fit() {
        let widths = column_widths(&[column(Some(60.0)), column(Some(60.0))], 420.0);
        assert_eq!(widths, vec![210.0, 210.0]);
    }

    #[test]
    fn test_cell_alignment() {
        let style = ResolvedStyle::new()
            .font_size(10.0)
            .horizontal_alignment(HorizontalAlignment::Right);
        let block = Cell::new("1", &style, 100.0).place(72.0, 72.0, None);
        // "1" is 5.56pt wide at 10pt
        assert!((block.lines[0].x - (72.0 + 100.0 - 2.0 - 5.56)).abs() < 1e-9);
        assert_eq!(block.height, 10.0 * 1.15 + 4.0);
    }
}
