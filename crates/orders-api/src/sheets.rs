//! Google Sheets ledger client
//!
//! Authenticates server-to-server with a signed JWT-bearer grant and appends
//! order rows to the configured spreadsheet. Writes are append-only and never
//! retried; any failure is surfaced to the caller.

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GoogleConfig;

const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// Scope restricted to spreadsheet writes.
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime; Google caps access tokens at one hour.
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Client for the spreadsheet ledger
pub struct SheetsClient {
    config: GoogleConfig,
    token_url: String,
    base_url: String,
    client: reqwest::Client,
}

/// Claims of the service-account assertion (RS256)
#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl SheetsClient {
    /// Create a client against the real Google endpoints
    pub fn new(config: GoogleConfig) -> Self {
        Self::with_endpoints(
            config,
            DEFAULT_TOKEN_URL.to_string(),
            DEFAULT_SHEETS_BASE_URL.to_string(),
        )
    }

    /// Endpoints are injectable so tests can target a local server
    pub fn with_endpoints(config: GoogleConfig, token_url: String, base_url: String) -> Self {
        Self {
            config,
            token_url,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Exchange a signed service-account assertion for a short-lived bearer
    /// token.
    async fn fetch_access_token(&self) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.config.service_account_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_url,
            exp: now + TOKEN_LIFETIME_SECS,
            iat: now,
        };

        let key = EncodingKey::from_rsa_pem(self.config.private_key_pem.as_bytes())
            .context("Invalid service-account private key")?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .context("Failed to sign service-account assertion")?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("Token endpoint unreachable")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Token exchange failed: {} {}", status, body);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        Ok(token.access_token)
    }

    /// Append one row as the last entry of the configured sheet.
    ///
    /// `USER_ENTERED` lets the spreadsheet interpret values as its native
    /// types instead of forcing literal strings.
    pub async fn append_row(&self, row: &[String]) -> Result<()> {
        let access_token = self.fetch_access_token().await?;
        let url = self.append_url();

        debug!("Appending order row to sheet '{}'", self.config.sheet_name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await
            .context("Sheets API unreachable")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sheets append failed: {} {}", status, body);
        }

        Ok(())
    }

    fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}!A:L:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.base_url, self.config.spreadsheet_id, self.config.sheet_name
        )
    }
}
