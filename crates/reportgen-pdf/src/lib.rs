//! # reportgen-pdf
//!
//! PDF output for reportgen. [`DocumentLayout`] paginates a
//! [`RenderPlan`](reportgen_core::RenderPlan) on A4 pages and [`PdfWriter`]
//! draws the result with printpdf's built-in Helvetica faces.

pub mod error;
pub mod layout;
pub mod metrics;
mod writer;

pub use error::{PdfError, PdfResult};
pub use layout::{Block, DocumentLayout, Page, PageGeometry, TextRun};
pub use writer::PdfWriter;
