//! The remote calendar seam.

use std::fmt;

use crate::event::RemoteEvent;

/// A remote calendar that accepts event writes.
///
/// Every method reports failure as a [`RemoteError`] value; the reconciler
/// decides what a failure means through [`classify`].
#[allow(async_fn_in_trait)]
pub trait CalendarService {
    /// Overwrite the event stored under `event_id`.
    async fn update(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &RemoteEvent,
    ) -> Result<RemoteEventRef, RemoteError>;

    /// Create a new event. The service may assign its own id.
    async fn insert(&self, calendar_id: &str, body: &RemoteEvent)
    -> Result<RemoteEventRef, RemoteError>;

    /// Create an event that keeps the client-supplied id in `body`.
    async fn import(&self, calendar_id: &str, body: &RemoteEvent)
    -> Result<RemoteEventRef, RemoteError>;
}

/// What the service returns for a stored event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEventRef {
    pub id: String,
    pub html_link: Option<String>,
}

/// Failure reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status, if the request got a response at all.
    pub status: Option<u16>,
    pub message: String,
}

impl RemoteError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        RemoteError {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Failure before any response (connection, TLS, timeout).
    pub fn transport(message: impl Into<String>) -> Self {
        RemoteError {
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for RemoteError {}

/// How the reconciler treats a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No event under the given id.
    NotFound,
    /// The service refused the client-supplied id.
    InvalidId,
    /// Authorization is missing the needed scope or is stale.
    PermissionDenied,
    Other,
}

/// Classify a remote failure by status code and message.
pub fn classify(err: &RemoteError) -> FailureKind {
    let message = err.message.to_lowercase();

    match err.status {
        Some(404) | Some(410) => FailureKind::NotFound,
        Some(400) if message.contains("invalid resource id") || message.contains("invalid id") => {
            FailureKind::InvalidId
        }
        Some(403) => FailureKind::PermissionDenied,
        _ => FailureKind::Other,
    }
}
