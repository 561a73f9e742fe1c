//! # reportgen-xlsx
//!
//! XLSX (Office Open XML) support for reportgen:
//! - [`XlsxWriter`] renders a [`RenderPlan`](reportgen_core::RenderPlan) as a
//!   single-sheet workbook
//! - [`XlsxReader`] reads worksheets as plain tables, used for metadata
//!   workbooks and spreadsheet data sources

pub mod address;
pub mod error;
pub mod reader;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::{SheetTable, WorkbookTables, XlsxReader};
pub use writer::XlsxWriter;
