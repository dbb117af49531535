//! Credential and token storage for the Google backend.
//!
//! Files live in:
//!   ~/.config/syllabus-sync/google/credentials.json
//!   ~/.config/syllabus-sync/google/tokens.json

use crate::types::{AccountTokens, GoogleCredentials};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

fn base_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("syllabus-sync")
        .join("google"))
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    dir: PathBuf,
}

impl GoogleConfig {
    pub fn load() -> Result<Self> {
        Ok(Self { dir: base_dir()? })
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_credentials(&self) -> Result<GoogleCredentials> {
        let path = self.dir.join("credentials.json");

        if !path.exists() {
            anyhow::bail!(
                "Google credentials not found.\n\n\
                Create {} with:\n\n\
                {{\n  \
                  \"client_id\": \"your-client-id.apps.googleusercontent.com\",\n  \
                  \"client_secret\": \"your-client-secret\"\n\
                }}\n\n\
                See https://console.cloud.google.com/apis/credentials for setup.",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse credentials from {}", path.display()))
    }

    pub fn load_tokens(&self) -> Result<AccountTokens> {
        let path = self.token_path();

        if !path.exists() {
            anyhow::bail!(
                "No Google tokens found at {}.\n\
                Sign in with Google and save the issued tokens there first.",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read tokens from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse tokens from {}", path.display()))
    }

    pub fn save_tokens(&self, tokens: &AccountTokens) -> Result<()> {
        let path = self.token_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create tokens directory at {}", parent.display())
            })?;
        }

        let contents =
            serde_json::to_string_pretty(tokens).context("Failed to serialize tokens")?;

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write tokens to {}", path.display()))?;

        Ok(())
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join("tokens.json")
    }
}
