//! Stored OAuth material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OAuth client credentials for Google Calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Tokens for the authenticated account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccountTokens {
    /// True when the access token expires within the next minute.
    pub fn needs_refresh(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() + chrono::Duration::seconds(60) >= expires_at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(expires_at: Option<DateTime<Utc>>) -> AccountTokens {
        AccountTokens {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_needs_refresh() {
        assert!(!tokens(None).needs_refresh());
        assert!(!tokens(Some(Utc::now() + chrono::Duration::hours(1))).needs_refresh());
        assert!(tokens(Some(Utc::now() + chrono::Duration::seconds(30))).needs_refresh());
        assert!(tokens(Some(Utc::now() - chrono::Duration::hours(1))).needs_refresh());
    }
}
