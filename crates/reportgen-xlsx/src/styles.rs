//! XLSX styles (styles.xml) writing

use ahash::AHashMap;
use reportgen_core::style::{Alignment, Color, FontStyle, ResolvedStyle, VerticalAlignment};
use reportgen_core::{NumberFormatCode, PlanNode, RenderPlan};

/// Font used when a style leaves name or size unset
pub(crate) const DEFAULT_FONT_NAME: &str = "Calibri";
pub(crate) const DEFAULT_FONT_SIZE: f64 = 11.0;

/// Deduplicated cell formats of one workbook.
///
/// Index 0 is always the default format; every distinct [`ResolvedStyle`] of
/// the plan gets its own `cellXfs` entry.
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    styles: Vec<ResolvedStyle>,
    xf_ids: AHashMap<ResolvedStyle, u32>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    num_fmt_id: u32,
}

impl XlsxStyleTable {
    /// Collect every style a plan uses
    pub(crate) fn build(plan: &RenderPlan) -> Self {
        let default = ResolvedStyle::default();
        let mut xf_ids = AHashMap::new();
        xf_ids.insert(default.clone(), 0);
        let mut table = Self {
            styles: vec![default],
            xf_ids,
        };

        for node in plan.nodes() {
            match node {
                PlanNode::Title(banner) | PlanNode::GroupCaption(banner) => {
                    table.intern(&banner.style);
                }
                PlanNode::HeaderRow(cells) | PlanNode::DataRow(cells) | PlanNode::TotalsRow(cells) => {
                    for cell in cells {
                        table.intern(&cell.style);
                    }
                }
                PlanNode::PageBreak => {}
            }
        }

        table
    }

    fn intern(&mut self, style: &ResolvedStyle) -> u32 {
        if let Some(&id) = self.xf_ids.get(style) {
            return id;
        }
        let id = self.styles.len() as u32;
        self.styles.push(style.clone());
        self.xf_ids.insert(style.clone(), id);
        id
    }

    /// `cellXfs` index of a style collected by [`Self::build`]
    pub(crate) fn xf_id(&self, style: &ResolvedStyle) -> u32 {
        self.xf_ids.get(style).copied().unwrap_or(0)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut font_ids: AHashMap<FontStyle, u32> = AHashMap::new();
        let mut fonts: Vec<FontStyle> = Vec::new();
        let default_font = FontStyle::default();
        fonts.push(default_font.clone());
        font_ids.insert(default_font, 0);

        // Excel requires the first two fills to be none and gray125
        let mut fill_ids: AHashMap<Color, u32> = AHashMap::new();
        let mut fills: Vec<Color> = Vec::new();

        let mut border_ids: AHashMap<Color, u32> = AHashMap::new();
        let mut borders: Vec<Color> = Vec::new();

        let mut numfmt_ids: AHashMap<String, u32> = AHashMap::new();
        let mut numfmts: Vec<(u32, String)> = Vec::new();
        let mut next_numfmt_id: u32 = 164;

        let mut resolved: Vec<ResolvedXfIds> = Vec::with_capacity(self.styles.len());

        for style in &self.styles {
            let font_id = match font_ids.get(&style.font) {
                Some(&id) => id,
                None => {
                    let id = fonts.len() as u32;
                    fonts.push(style.font.clone());
                    font_ids.insert(style.font.clone(), id);
                    id
                }
            };

            let fill_id = match style.fill {
                None => 0,
                Some(color) => *fill_ids.entry(color).or_insert_with(|| {
                    fills.push(color);
                    fills.len() as u32 + 1
                }),
            };

            let border_id = match style.border {
                None => 0,
                Some(color) => *border_ids.entry(color).or_insert_with(|| {
                    borders.push(color);
                    borders.len() as u32
                }),
            };

            let num_fmt_id = match style.number_format.as_deref().and_then(xlsx_format_code) {
                None => 0,
                Some(code) => match builtin_format_id(&code) {
                    Some(id) => id,
                    None => *numfmt_ids.entry(code.clone()).or_insert_with(|| {
                        let id = next_numfmt_id;
                        next_numfmt_id += 1;
                        numfmts.push((id, code));
                        id
                    }),
                },
            };

            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
            });
        }

        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml_attr(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len() + 2));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for color in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(color));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len() + 1));
        xml.push_str("\n    <border><left/><right/><top/><bottom/><diagonal/></border>");
        for color in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(color));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

/// Format code written to styles.xml for a metadata number format.
///
/// Percent cells already hold `value * 100`, so their code shows a literal
/// percent sign instead of Excel's scaling `%`. Codes that are not numeric
/// formats are not applied at all.
pub(crate) fn xlsx_format_code(code: &str) -> Option<String> {
    match NumberFormatCode::parse(code)? {
        NumberFormatCode::Percent { decimals } => {
            let mut literal = String::from("0");
            if decimals > 0 {
                literal.push('.');
                literal.push_str(&"0".repeat(decimals as usize));
            }
            literal.push_str("\"%\"");
            Some(literal)
        }
        _ => Some(code.trim().to_string()),
    }
}

fn builtin_format_id(code: &str) -> Option<u32> {
    match code {
        "0" => Some(1),
        "0.00" => Some(2),
        "#,##0" => Some(3),
        "#,##0.00" => Some(4),
        _ => None,
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn escape_xml_attr(s: &str) -> String {
    escape_xml(s)
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size_or(DEFAULT_FONT_SIZE)));
    if let Some(color) = font.color {
        s.push_str(&format!("<color rgb=\"{}\"/>", color.to_argb_hex()));
    }
    s.push_str(&format!(
        "<name val=\"{}\"/>",
        escape_xml_attr(font.name.as_deref().unwrap_or(DEFAULT_FONT_NAME))
    ));
    s.push_str("</font>");
    s
}

fn write_fill(color: &Color) -> String {
    format!(
        "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
        color.to_argb_hex()
    )
}

/// Thin border on all four edges
fn write_border(color: &Color) -> String {
    let argb = color.to_argb_hex();
    let mut s = String::from("<border>");
    for tag in ["left", "right", "top", "bottom"] {
        s.push_str(&format!(
            "<{tag} style=\"thin\"><color rgb=\"{argb}\"/></{tag}>"
        ));
    }
    s.push_str("<diagonal/></border>");
    s
}

fn vert_to_str(v: VerticalAlignment) -> Option<&'static str> {
    match v {
        VerticalAlignment::Top => Some("top"),
        VerticalAlignment::Middle => Some("center"),
        VerticalAlignment::Bottom => None,
    }
}

fn write_alignment(al: &Alignment) -> String {
    let mut s = String::from("<alignment");
    s.push_str(&format!(" horizontal=\"{}\"", al.horizontal.as_str()));
    if let Some(vertical) = vert_to_str(al.vertical) {
        s.push_str(&format!(" vertical=\"{}\"", vertical));
    }
    if al.wrap_text {
        s.push_str(" wrapText=\"1\"");
    }
    s.push_str("/>");
    s
}

fn write_xf(style: &ResolvedStyle, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if style.font != FontStyle::default() {
        attrs.push_str(" applyFont=\"1\"");
    }
    if style.fill.is_some() {
        attrs.push_str(" applyFill=\"1\"");
    }
    if style.border.is_some() {
        attrs.push_str(" applyBorder=\"1\"");
    }

    let s = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id, attrs
    );

    if style.alignment == Alignment::default() {
        return format!("{s}/>");
    }
    format!(
        "{s} applyAlignment=\"1\">{}</xf>",
        write_alignment(&style.alignment)
    )
}
