//! # reportgen-html
//!
//! Renders a [`RenderPlan`](reportgen_core::RenderPlan) as a standalone HTML
//! document. Styles are inlined on every cell so the file renders the same
//! without any stylesheet.

mod css;
mod writer;

pub use css::escape_html;
pub use writer::HtmlWriter;
