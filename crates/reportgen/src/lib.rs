//! # reportgen
//!
//! Metadata-driven report rendering.
//!
//! A report is declared in a metadata workbook: which fields to show, which
//! fields group the rows, number formats, fonts and colors. `reportgen`
//! reads that declaration, loads the rows of a CSV or XLSX data source and
//! writes a formatted XLSX, PDF or HTML document.
//!
//! ## Features
//!
//! - Grouping by header fields with captions, page-per-group layout and
//!   per-group totals
//! - en-US number formatting (currency, percent, fixed decimals)
//! - One render plan shared by the XLSX, PDF and HTML writers
//! - Optional download of source reports from a remote analytics API
//!
//! ## Example
//!
//! ```no_run
//! use reportgen::prelude::*;
//!
//! let options = RenderOptions {
//!     output_dir: "out".into(),
//!     ..Default::default()
//! };
//! let report = render_report("Employee Survey", &options)?;
//! println!("wrote {}", report.path.display());
//! # Ok::<(), reportgen::Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod metadata;
pub mod prelude;
pub mod render;
pub mod sink;
pub mod source;

pub use engine::{
    render_report, render_rows, RenderOptions, RenderedReport, DEFAULT_METADATA_FILE,
};
pub use error::{Error, Result};
pub use metadata::{
    resolve_report, MetadataSource, WorkbookMetadata, COLUMNS_SHEET, REPORTS_SHEET,
};
pub use render::{renderer_for, DocumentRenderer, HtmlRenderer, PdfRenderer, XlsxRenderer};
pub use sink::{output_file_name, DocumentSink};
pub use source::{load_rows, rows_from_table, SourceKind};

// Re-export core types
pub use reportgen_core::Error as CoreError;
pub use reportgen_core::{
    build_plan, CellValue, Color, ColumnSpec, DataRow, HeadingType, HorizontalAlignment,
    MetadataRecord, NodeKind, OutputTarget, PageOrientation, PlanNode, RawValue, RenderPlan,
    ReportSpec, ResolvedStyle,
};

// Re-export I/O types
pub use reportgen_csv::{CsvError, CsvReadOptions, CsvReader};
pub use reportgen_export::{
    exchange_jwt_assertion, AccessToken, ExportClient, ExportError, JwtBearerConfig,
    DEFAULT_AUDIENCE, DEFAULT_TOKEN_URL,
};
pub use reportgen_html::HtmlWriter;
pub use reportgen_pdf::{PdfError, PdfWriter};
pub use reportgen_xlsx::{XlsxError, XlsxReader, XlsxWriter};
