//! OAuth access tokens

use std::fmt;

use serde::Deserialize;

use crate::client::{check_status, http_client};
use crate::error::ExportResult;

/// Grant type for exchanging a signed JWT assertion
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Bearer token and the instance it is valid for
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub instance_url: String,
}

impl AccessToken {
    pub fn new<T: Into<String>, U: Into<String>>(access_token: T, instance_url: U) -> Self {
        Self {
            access_token: access_token.into(),
            instance_url: instance_url.into(),
        }
    }

    /// Both parts are present
    pub fn is_complete(&self) -> bool {
        !self.access_token.trim().is_empty() && !self.instance_url.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

/// Exchange a signed JWT assertion for an access token.
///
/// The assertion is posted form-encoded with the jwt-bearer grant type;
/// signing it is up to the caller.
pub fn exchange_jwt_assertion(token_url: &str, assertion: &str) -> ExportResult<AccessToken> {
    let client = http_client()?;
    let response = client
        .post(token_url)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
        .send()?;
    let body = check_status(token_url, response)?.text()?;

    let token: AccessToken = serde_json::from_str(&body)?;
    log::info!("Obtained access token for {}", token.instance_url);
    Ok(token)
}
