//! Error types for reportgen-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving metadata or building a render plan
#[derive(Debug, Error)]
pub enum Error {
    /// No column entries or no report-level row match the requested name
    #[error("Report not found in metadata: {0}")]
    MetadataNotFound(String),

    /// Every declared column is a header field, so there is nothing to display
    #[error("Report '{0}' declares no data fields")]
    NoDataFields(String),

    /// A field name is declared more than once for the same report
    #[error("Duplicate field '{field}' in report '{report}'")]
    DuplicateField { report: String, field: String },

    /// A metadata record is missing a required column
    #[error("Metadata record is missing '{0}'")]
    MissingAttribute(&'static str),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
