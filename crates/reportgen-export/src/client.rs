//! Report export client

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::{Client, Response};

use crate::error::{ExportError, ExportResult};
use crate::token::AccessToken;

/// REST API version used for report exports
pub const API_VERSION: &str = "v57.0";

const USER_AGENT: &str = concat!("reportgen/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(300);

static REPORT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{15,18}$").expect("report id pattern is valid"));

pub(crate) fn http_client() -> ExportResult<Client> {
    Ok(Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Pass successful responses through; anything else becomes an error
/// carrying the response body
pub(crate) fn check_status(url: &str, response: Response) -> ExportResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ExportError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// Check that `report_id` is a 15 or 18 character style record id
pub fn validate_report_id(report_id: &str) -> ExportResult<()> {
    if REPORT_ID.is_match(report_id) {
        Ok(())
    } else {
        Err(ExportError::InvalidReportId(report_id.to_string()))
    }
}

/// Downloads reports as XLSX workbooks
pub struct ExportClient {
    client: Client,
}

impl ExportClient {
    /// Create a client with the default timeout and user agent
    pub fn new() -> ExportResult<Self> {
        Ok(Self {
            client: http_client()?,
        })
    }

    /// Export URL for a report
    pub fn report_url(token: &AccessToken, report_id: &str) -> String {
        format!(
            "{}/services/data/{}/analytics/reports/{}?export=1&enc=UTF-8&format=xlsx",
            token.instance_url.trim().trim_end_matches('/'),
            API_VERSION,
            report_id
        )
    }

    /// Download a report into `dest_dir` as `<report_id>.xlsx` and return
    /// the written path
    pub fn export_report<P: AsRef<Path>>(
        &self,
        token: &AccessToken,
        report_id: &str,
        dest_dir: P,
    ) -> ExportResult<PathBuf> {
        if !token.is_complete() {
            return Err(ExportError::MissingCredentials);
        }
        validate_report_id(report_id)?;

        let url = Self::report_url(token, report_id);
        log::debug!("Exporting report {} from {}", report_id, token.instance_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&token.access_token)
            .send()?;
        let bytes = check_status(&url, response)?.bytes()?;

        let path = dest_dir.as_ref().join(format!("{}.xlsx", report_id));
        fs::write(&path, &bytes)?;
        log::info!("Exported report {} to {}", report_id, path.display());
        Ok(path)
    }
}
