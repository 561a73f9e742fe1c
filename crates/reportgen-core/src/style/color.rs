//! Color representation

use std::fmt;

/// An explicit color parsed from report metadata.
///
/// Metadata only ever carries hex strings, so there is no theme or indexed
/// palette here; an absent color is modelled as `Option::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// RGB color (no alpha)
    Rgb { r: u8, g: u8, b: u8 },

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create from a hex string (e.g., "#FF0000", "FF0000" or "80FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::Rgb { r, g, b })
            }
            8 => {
                let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Color::Argb { a, r, g, b })
            }
            _ => None,
        }
    }

    /// Convert to hex string (without # prefix)
    pub fn to_hex(&self) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
        }
    }

    /// Convert to ARGB hex string (8 characters, used by XLSX)
    pub fn to_argb_hex(&self) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("FF{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
        }
    }

    /// CSS notation (`#RRGGBB`); alpha is dropped
    pub fn to_css(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Convert to RGB tuple
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Rgb { r, g, b } => (*r, *g, *b),
            Color::Argb { r, g, b, .. } => (*r, *g, *b),
        }
    }

    /// RGB components scaled to `0.0..=1.0`, as PDF color operators expect
    pub fn to_unit_rgb(&self) -> (f32, f32, f32) {
        let (r, g, b) = self.to_rgb();
        (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
