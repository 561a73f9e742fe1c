//! Prelude module - common imports for reportgen users
//!
//! ```rust
//! use reportgen::prelude::*;
//! ```

pub use crate::{
    // Pipeline
    build_plan,
    load_rows,
    render_report,
    render_rows,
    resolve_report,

    // Model types
    ColumnSpec,
    DataRow,
    HeadingType,
    OutputTarget,
    RawValue,
    RenderOptions,
    RenderPlan,
    RenderedReport,
    ReportSpec,

    // Metadata and output
    DocumentRenderer,
    MetadataSource,
    WorkbookMetadata,

    // Error types
    Error,
    Result,
};
