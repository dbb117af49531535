//! Access token handling.
//!
//! Signing in happens elsewhere; this module only turns stored tokens into a
//! usable access token, refreshing and re-saving them when they expire.

use crate::config::GoogleConfig;
use crate::types::{AccountTokens, GoogleCredentials};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

pub struct GoogleAuth {
    config: GoogleConfig,
    token_url: String,
    http: reqwest::Client,
}

impl GoogleAuth {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            token_url: TOKEN_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Get an access token, refreshing the stored tokens if needed.
    pub async fn access_token(&self) -> Result<String> {
        let mut tokens = self.config.load_tokens()?;

        if tokens.needs_refresh() {
            debug!("Access token expired, refreshing");
            let creds = self.config.load_credentials()?;
            tokens = self.refresh(&creds, &tokens).await?;
            self.config.save_tokens(&tokens)?;
        }

        Ok(tokens.access_token)
    }

    async fn refresh(
        &self,
        creds: &GoogleCredentials,
        tokens: &AccountTokens,
    ) -> Result<AccountTokens> {
        if tokens.refresh_token.is_empty() {
            anyhow::bail!("Access token expired and no refresh token is stored. Sign in again.");
        }

        let params = [
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("refresh_token", tokens.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response: TokenResponse = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .context("Failed to refresh token")?
            .json()
            .await
            .context("Failed to parse token response")?;

        if let Some(error) = response.error {
            anyhow::bail!(
                "Token refresh rejected: {} {}",
                error,
                response.error_description.unwrap_or_default()
            );
        }

        let access_token = response
            .access_token
            .context("Token response had no access_token")?;

        let expires_at = response
            .expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| Utc::now() + chrono::Duration::seconds(secs));

        // Google typically doesn't return a new refresh_token on refresh
        let refresh_token = response
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| tokens.refresh_token.clone());

        Ok(AccountTokens {
            access_token,
            refresh_token,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_files(config: &GoogleConfig, expires_at: chrono::DateTime<Utc>) {
        std::fs::create_dir_all(config.dir()).unwrap();
        std::fs::write(
            config.dir().join("credentials.json"),
            r#"{"client_id":"cid","client_secret":"secret"}"#,
        )
        .unwrap();
        config
            .save_tokens(&AccountTokens {
                access_token: "old".to_string(),
                refresh_token: "refresh-1".to_string(),
                expires_at: Some(expires_at),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn test_valid_token_is_used_without_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let config = GoogleConfig::at(dir.path());
        write_files(&config, Utc::now() + chrono::Duration::hours(1));

        let auth = GoogleAuth::new(config).with_token_url("http://127.0.0.1:9/unused");
        assert_eq!(auth.access_token().await.unwrap(), "old");
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_and_saved() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "refresh_token".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"new","expires_in":3599,"token_type":"Bearer"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = GoogleConfig::at(dir.path());
        write_files(&config, Utc::now() - chrono::Duration::minutes(5));

        let auth = GoogleAuth::new(config.clone()).with_token_url(format!("{}/token", server.url()));
        assert_eq!(auth.access_token().await.unwrap(), "new");
        mock.assert_async().await;

        let saved = config.load_tokens().unwrap();
        assert_eq!(saved.access_token, "new");
        assert_eq!(saved.refresh_token, "refresh-1");
        assert!(!saved.needs_refresh());
    }

    #[tokio::test]
    async fn test_refresh_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = GoogleConfig::at(dir.path());
        write_files(&config, Utc::now() - chrono::Duration::minutes(5));

        let auth = GoogleAuth::new(config).with_token_url(format!("{}/token", server.url()));
        let err = auth.access_token().await.unwrap_err().to_string();
        assert!(err.contains("invalid_grant"), "{}", err);
    }
}
