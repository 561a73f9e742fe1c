//! Export error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while exporting a remote report
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token or instance URL is blank
    #[error("Valid access token and instance URL required")]
    MissingCredentials,

    /// Report id is not 15 to 18 alphanumeric characters
    #[error("Invalid report id: '{0}'")]
    InvalidReportId(String),

    /// Remote side answered with a non-success status
    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Service account key could not be read
    #[error("Cannot read private key {}: {source}", path.display())]
    PrivateKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key parsing or assertion signing failed
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Token endpoint returned something other than a token
    #[error("Malformed token response: {0}")]
    TokenResponse(#[from] serde_json::Error),
}
