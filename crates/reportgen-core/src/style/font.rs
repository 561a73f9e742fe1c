//! Font style types

use super::Color;

/// Font settings resolved from metadata.
///
/// `None` fields leave the backend's default in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontStyle {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Bold
    pub bold: bool,
    /// Font color
    pub color: Option<Color>,
}

impl FontStyle {
    /// Create a new default font
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set font size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Font size, falling back to `default` when unset
    pub fn size_or(&self, default: f64) -> f64 {
        self.size.unwrap_or(default)
    }
}

impl std::hash::Hash for FontStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.map(f64::to_bits).hash(state);
        self.bold.hash(state);
        self.color.hash(state);
    }
}

impl Eq for FontStyle {}
