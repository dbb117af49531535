use std::fmt;

use serde::{Deserialize, Serialize};

use super::service::RemoteEventRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Inserted,
    Updated,
    Error,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Inserted => write!(f, "+"),
            OutcomeStatus::Updated => write!(f, "~"),
            OutcomeStatus::Error => write!(f, "!"),
        }
    }
}

/// Result of reconciling one task. Created once, never mutated.
///
/// Serializes to the `{id, status, htmlLink, message}` shape clients of the
/// sync route read, plus the title and the id the remote calendar stored the
/// event under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationOutcome {
    /// External-safe identity of the task.
    #[serde(rename = "id")]
    pub identity: String,
    pub title: String,
    pub status: OutcomeStatus,
    /// Id the remote calendar stored the event under. Differs from
    /// `identity` when the insert tier let the service pick one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReconciliationOutcome {
    pub(crate) fn success(
        identity: String,
        title: String,
        status: OutcomeStatus,
        stored: RemoteEventRef,
    ) -> Self {
        ReconciliationOutcome {
            identity,
            title,
            status,
            remote_id: Some(stored.id),
            html_link: stored.html_link,
            message: None,
        }
    }

    pub(crate) fn error(identity: String, title: String, message: String) -> Self {
        ReconciliationOutcome {
            identity,
            title,
            status: OutcomeStatus::Error,
            remote_id: None,
            html_link: None,
            message: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == OutcomeStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serializes_route_keys() {
        let outcome = ReconciliationOutcome::success(
            "syl-abc".to_string(),
            "Midterm".to_string(),
            OutcomeStatus::Inserted,
            RemoteEventRef {
                id: "server-1".to_string(),
                html_link: Some("https://calendar.google.com/event?eid=x".to_string()),
            },
        );

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "id": "syl-abc",
                "title": "Midterm",
                "status": "inserted",
                "remoteId": "server-1",
                "htmlLink": "https://calendar.google.com/event?eid=x",
            })
        );
    }

    #[test]
    fn test_error_serializes_message_without_link() {
        let outcome = ReconciliationOutcome::error(
            "syl-abc".to_string(),
            "Midterm".to_string(),
            "Backend Error".to_string(),
        );

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "id": "syl-abc",
                "title": "Midterm",
                "status": "error",
                "message": "Backend Error",
            })
        );
    }
}
