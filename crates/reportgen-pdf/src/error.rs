//! PDF error types

use thiserror::Error;

/// Result type for PDF operations
pub type PdfResult<T> = std::result::Result<T, PdfError>;

/// Errors that can occur while rendering a PDF
#[derive(Debug, Error)]
pub enum PdfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the PDF library
    #[error("PDF error: {0}")]
    Render(String),

    /// Plan has no columns to lay out
    #[error("Report has no columns to lay out")]
    NoColumns,
}
