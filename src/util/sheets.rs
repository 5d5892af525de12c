//! Google Sheets append-only log client.
//!
//! Submitted property forms are mirrored as one row in an external
//! spreadsheet. Authentication is the service-account JWT grant: sign an
//! RS256 assertion with the configured private key, exchange it for a
//! bearer token, then call the `values:append` endpoint.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::SheetsConfig;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Error types for spreadsheet log operations
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),
    #[error("Failed to sign token assertion: {0}")]
    AssertionFailed(String),
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),
    #[error("Append request failed: {0}")]
    RequestFailed(String),
    #[error("Sheets API rejected the append: status {status}, body: {body}")]
    ApiError { status: u16, body: String },
}

/// Outbound append sink for submitted property rows. The production
/// implementation talks to Google Sheets; tests substitute a recording fake.
#[async_trait]
pub trait SheetLogAppender: Send + Sync {
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetsError>;
}

#[derive(Debug, Serialize)]
struct GrantClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct GoogleSheetsClient {
    config: SheetsConfig,
    http: reqwest::Client,
}

impl GoogleSheetsClient {
    pub fn new(config: SheetsConfig) -> Self {
        GoogleSheetsClient {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn sign_assertion(&self) -> Result<String, SheetsError> {
        let now = Utc::now().timestamp();
        let claims = GrantClaims {
            iss: self.config.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: TOKEN_URL.to_string(),
            iat: now,
            exp: now + 3600,
        };

        let key = EncodingKey::from_rsa_pem(self.config.private_key.as_bytes())
            .map_err(|e| {
                error!("Service account private key is not valid RSA PEM: {}", e);
                SheetsError::InvalidKey(e.to_string())
            })?;

        encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| {
            error!("Failed to sign service account assertion: {}", e);
            SheetsError::AssertionFailed(e.to_string())
        })
    }

    async fn fetch_access_token(&self) -> Result<String, SheetsError> {
        debug!("Exchanging service account assertion for access token");
        let assertion = self.sign_assertion()?;

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Token exchange request failed: {}", e);
                SheetsError::TokenExchangeFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Token exchange rejected: status {}, body: {}", status, body);
            return Err(SheetsError::TokenExchangeFailed(format!("status {}: {}", status, body)));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            error!("Failed to parse token response: {}", e);
            SheetsError::TokenExchangeFailed(e.to_string())
        })?;

        debug!("Access token obtained");
        Ok(token.access_token)
    }
}

#[async_trait]
impl SheetLogAppender for GoogleSheetsClient {
    #[tracing::instrument(skip(self, row), fields(columns = row.len()))]
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetsError> {
        info!("Appending property row to spreadsheet log");

        let access_token = self.fetch_access_token().await?;

        let range = utf8_percent_encode(&self.config.range, NON_ALPHANUMERIC).to_string();
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}:append?valueInputOption=USER_ENTERED",
            self.config.sheet_id, range
        );

        let body = serde_json::json!({ "values": [row] });

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Append request failed: {}", e);
                SheetsError::RequestFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Sheets API rejected append: status {}, body: {}", status, body);
            return Err(SheetsError::ApiError { status, body });
        }

        info!("Row appended to spreadsheet log");
        Ok(())
    }
}
