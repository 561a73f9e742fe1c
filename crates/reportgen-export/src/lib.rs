//! # reportgen-export
//!
//! Downloads reports from a remote analytics REST API as XLSX workbooks,
//! ready to be used as a data source. Access tokens come either from the
//! caller or from the jwt-bearer flow with a service account key
//! ([`JwtBearerConfig`]).
//!
//! ```no_run
//! use reportgen_export::{AccessToken, ExportClient};
//!
//! let token = AccessToken::new("00D...", "https://example.my.salesforce.com");
//! let path = ExportClient::new()?.export_report(&token, "00O5e000008abcdEAA", ".")?;
//! println!("{}", path.display());
//! # Ok::<(), reportgen_export::ExportError>(())
//! ```

mod assertion;
mod client;
mod error;
mod token;

pub use assertion::{
    AssertionClaims, JwtBearerConfig, ASSERTION_LIFETIME_SECS, DEFAULT_AUDIENCE, DEFAULT_TOKEN_URL,
};
pub use client::{validate_report_id, ExportClient, API_VERSION};
pub use error::{ExportError, ExportResult};
pub use token::{exchange_jwt_assertion, AccessToken, JWT_BEARER_GRANT};
