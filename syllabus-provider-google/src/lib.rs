//! Google Calendar backend for syllabus-sync.
//!
//! [`GoogleCalendar`] implements the reconciler's `CalendarService` over the
//! Calendar v3 REST API. [`GoogleAuth`] supplies the bearer token from the
//! credentials and tokens stored under the user's config directory.

mod api;
mod auth;
mod config;
mod types;

pub use api::GoogleCalendar;
pub use auth::GoogleAuth;
pub use config::GoogleConfig;
pub use types::{AccountTokens, GoogleCredentials};
