//! Google Calendar v3 event writes.

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use syllabus_core::event::RemoteEvent;
use syllabus_core::reconcile::{CalendarService, RemoteError, RemoteEventRef};
use url::Url;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventResponse {
    id: String,
    #[serde(default)]
    html_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    message: String,
}

/// Google Calendar client authorized with a bearer access token.
pub struct GoogleCalendar {
    http: Client,
    base_url: Url,
    access_token: String,
}

impl GoogleCalendar {
    pub fn new(access_token: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_base_url(access_token, API_BASE)
    }

    pub fn with_base_url(access_token: impl Into<String>, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(base_url)?,
            access_token: access_token.into(),
        })
    }

    /// `{base}/calendars/{calendar_id}/events/{tail...}` with every segment
    /// percent-encoded.
    fn events_url(&self, calendar_id: &str, tail: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::transport(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("calendars")
            .push(calendar_id)
            .push("events")
            .extend(tail);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<RemoteEventRef, RemoteError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| RemoteError::transport(format!("Request failed: {e}")))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::new(status, format!("Failed to read response: {e}")))?;

        if !(200..300).contains(&status) {
            return Err(error_from_body(status, &text));
        }

        let event: EventResponse = serde_json::from_str(&text)
            .map_err(|e| RemoteError::new(status, format!("Unexpected response: {e}")))?;

        Ok(RemoteEventRef {
            id: event.id,
            html_link: event.html_link,
        })
    }
}

/// Build a `RemoteError` from a Google error response.
///
/// Uses the top-level message, then the first detailed error, then the raw
/// body.
fn error_from_body(status: u16, body: &str) -> RemoteError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| {
            let ErrorBody { message, errors } = envelope.error;
            if !message.is_empty() {
                Some(message)
            } else {
                errors.into_iter().map(|e| e.message).find(|m| !m.is_empty())
            }
        })
        .unwrap_or_else(|| body.trim().to_string());

    RemoteError::new(status, message)
}

impl CalendarService for GoogleCalendar {
    async fn update(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &RemoteEvent,
    ) -> Result<RemoteEventRef, RemoteError> {
        let url = self.events_url(calendar_id, &[event_id])?;
        self.send(self.http.put(url).json(body)).await
    }

    async fn insert(
        &self,
        calendar_id: &str,
        body: &RemoteEvent,
    ) -> Result<RemoteEventRef, RemoteError> {
        let url = self.events_url(calendar_id, &[])?;
        self.send(self.http.post(url).json(body)).await
    }

    async fn import(
        &self,
        calendar_id: &str,
        body: &RemoteEvent,
    ) -> Result<RemoteEventRef, RemoteError> {
        let url = self.events_url(calendar_id, &["import"])?;
        self.send(self.http.post(url).json(body)).await
    }
}
