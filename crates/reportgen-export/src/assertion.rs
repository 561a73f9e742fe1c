//! Signed JWT assertions for the OAuth jwt-bearer flow

use std::fs;
use std::path::PathBuf;

use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::token::{exchange_jwt_assertion, AccessToken};

/// Token endpoint used when none is configured
pub const DEFAULT_TOKEN_URL: &str = "https://login.salesforce.com/services/oauth2/token";

/// Audience used when none is configured
pub const DEFAULT_AUDIENCE: &str = "https://login.salesforce.com";

/// Seconds an assertion stays valid
pub const ASSERTION_LIFETIME_SECS: u64 = 180;

/// Registered claims of a jwt-bearer assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Connected app client id
    pub iss: String,
    /// User the token is issued for
    pub sub: String,
    pub aud: String,
    /// Expiry, seconds since the epoch
    pub exp: u64,
}

/// Everything needed to sign in with a service account key
#[derive(Debug, Clone)]
pub struct JwtBearerConfig {
    pub client_id: String,
    pub username: String,
    pub audience: String,
    pub token_url: String,
    /// RSA private key in PEM form (PKCS#1 or PKCS#8, unencrypted)
    pub private_key: PathBuf,
}

impl JwtBearerConfig {
    pub fn new<C, U, P>(client_id: C, username: U, private_key: P) -> Self
    where
        C: Into<String>,
        U: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            client_id: client_id.into(),
            username: username.into(),
            audience: DEFAULT_AUDIENCE.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            private_key: private_key.into(),
        }
    }

    pub fn with_audience<S: Into<String>>(mut self, audience: S) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_token_url<S: Into<String>>(mut self, token_url: S) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Claims for an assertion issued at `now`
    pub fn claims(&self, now: u64) -> AssertionClaims {
        AssertionClaims {
            iss: self.client_id.clone(),
            sub: self.username.clone(),
            aud: self.audience.clone(),
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }

    /// Sign the claims for `now` with RS256
    pub fn sign_assertion(&self, now: u64) -> ExportResult<String> {
        if self.client_id.trim().is_empty() || self.username.trim().is_empty() {
            return Err(ExportError::MissingCredentials);
        }
        let pem = fs::read(&self.private_key).map_err(|source| ExportError::PrivateKey {
            path: self.private_key.clone(),
            source,
        })?;
        let key = EncodingKey::from_rsa_pem(&pem)?;
        Ok(encode(&Header::new(Algorithm::RS256), &self.claims(now), &key)?)
    }

    /// Sign a fresh assertion and exchange it for an access token
    pub fn authenticate(&self) -> ExportResult<AccessToken> {
        log::debug!(
            "Requesting access token for {} from {}",
            self.username,
            self.token_url
        );
        let assertion = self.sign_assertion(get_current_timestamp())?;
        exchange_jwt_assertion(&self.token_url, &assertion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_claims_expire_after_lifetime() {
        let config = JwtBearerConfig::new("client", "user@example.com", "key.pem")
            .with_audience("https://login.example.com");
        assert_eq!(
            config.claims(1_000),
            AssertionClaims {
                iss: "client".into(),
                sub: "user@example.com".into(),
                aud: "https://login.example.com".into(),
                exp: 1_180,
            }
        );
    }

    #[test]
    fn test_missing_key_file() {
        let config = JwtBearerConfig::new("client", "user", "/nonexistent/key.pem");
        assert!(matches!(
            config.sign_assertion(0),
            Err(ExportError::PrivateKey { .. })
        ));
    }

    #[test]
    fn test_blank_client_id() {
        let config = JwtBearerConfig::new(" ", "user", "key.pem");
        assert!(matches!(
            config.sign_assertion(0),
            Err(ExportError::MissingCredentials)
        ));
    }
}
