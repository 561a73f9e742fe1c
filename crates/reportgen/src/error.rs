//! Error type for the rendering pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving, loading or rendering a report
#[derive(Debug, Error)]
pub enum Error {
    /// Metadata resolution or plan building failed
    #[error(transparent)]
    Core(#[from] reportgen_core::Error),

    /// XLSX output failed
    #[error(transparent)]
    Xlsx(#[from] reportgen_xlsx::XlsxError),

    /// PDF output failed
    #[error(transparent)]
    Pdf(#[from] reportgen_pdf::PdfError),

    /// Remote export failed
    #[error(transparent)]
    Export(#[from] reportgen_export::ExportError),

    /// IO error while writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The metadata workbook could not be read
    #[error("Cannot read metadata workbook '{}'", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: reportgen_xlsx::XlsxError,
    },

    /// The data source could not be read
    #[error("Cannot read data source '{}'", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The report declares no data source and none was given
    #[error("Report '{0}' declares no data source")]
    MissingSource(String),
}

impl Error {
    pub(crate) fn unreadable_source<E>(path: impl Into<PathBuf>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Source {
            path: path.into(),
            source: Box::new(err),
        }
    }
}
