//! Cell styling types
//!
//! This module contains the backend-neutral style vocabulary:
//! - [`ResolvedStyle`] - Complete style of one plan cell
//! - [`FontStyle`] - Font settings
//! - [`Alignment`] - Text alignment
//! - [`Color`] - Color representation

mod alignment;
mod color;
mod font;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use color::Color;
pub use font::FontStyle;

/// Complete style of one cell in a render plan.
///
/// Report-level and column-level metadata are merged into this value once;
/// output adapters only ever read it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedStyle {
    /// Font settings
    pub font: FontStyle,
    /// Solid background fill
    pub fill: Option<Color>,
    /// Thin border on all four edges, in this color
    pub border: Option<Color>,
    /// Text alignment
    pub alignment: Alignment,
    /// Number format code applied to numeric values
    pub number_format: Option<String>,
}

impl ResolvedStyle {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = Some(size);
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font.name = Some(name.into());
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = Some(color);
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set border color
    pub fn border_color(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }

    /// Enable text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.alignment.wrap_text = wrap;
        self
    }
}

impl std::hash::Hash for ResolvedStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.font.hash(state);
        self.fill.hash(state);
        self.border.hash(state);
        self.alignment.hash(state);
        self.number_format.hash(state);
    }
}

impl Eq for ResolvedStyle {}
