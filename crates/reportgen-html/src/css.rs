//! Escaping and inline style declarations

use reportgen_core::{HorizontalAlignment, ResolvedStyle, VerticalAlignment};

/// Escape text for element content and double-quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Quoted family name with a sans-serif fallback
fn font_family(name: &str) -> String {
    let name = name.replace(['"', ';', '<', '>'], "");
    format!("'{}', sans-serif", name.replace('\'', ""))
}

/// Inline declarations for a resolved style; empty when nothing is set
pub(crate) fn style_declarations(style: &ResolvedStyle) -> String {
    let mut decls: Vec<String> = Vec::new();

    if let Some(name) = style.font.name.as_deref().filter(|n| !n.trim().is_empty()) {
        decls.push(format!("font-family: {}", font_family(name.trim())));
    }
    if let Some(size) = style.font.size {
        decls.push(format!("font-size: {}pt", size));
    }
    if style.font.bold {
        decls.push("font-weight: bold".to_string());
    }
    if let Some(color) = style.font.color {
        decls.push(format!("color: {}", color.to_css()));
    }
    if let Some(fill) = style.fill {
        decls.push(format!("background-color: {}", fill.to_css()));
    }
    if let Some(border) = style.border {
        decls.push(format!("border: 1px solid {}", border.to_css()));
    }
    if style.alignment.horizontal != HorizontalAlignment::Left {
        decls.push(format!("text-align: {}", style.alignment.horizontal.as_str()));
    }
    match style.alignment.vertical {
        VerticalAlignment::Top => decls.push("vertical-align: top".to_string()),
        VerticalAlignment::Middle => decls.push("vertical-align: middle".to_string()),
        VerticalAlignment::Bottom => {}
    }
    if !style.alignment.wrap_text {
        decls.push("white-space: nowrap".to_string());
    }

    decls.join("; ")
}

/// ` style="..."` or nothing
pub(crate) fn style_attr(style: &ResolvedStyle) -> String {
    let decls = style_declarations(style);
    if decls.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_html(&decls))
    }
}
