//! Reconciling tasks against a remote calendar.
//!
//! Each task is written with up to three operations, in order: update by
//! derived identity, insert without an id, import with the id. Tasks are
//! processed one at a time and a failing task never stops the run.

mod outcome;
mod service;
mod tier;

pub use outcome::{OutcomeStatus, ReconciliationOutcome};
pub use service::{CalendarService, FailureKind, RemoteError, RemoteEventRef, classify};
pub use tier::{Tier, Transition};

use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::SyllabusResult;
use crate::event::{MappedTask, map_tasks};
use crate::task::Task;

/// Google's alias for the user's main calendar
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// Where and how to write events.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    pub calendar_id: String,
    pub timezone: Tz,
}

/// Reconcile every task against `service`, returning one outcome per task in
/// input order.
///
/// The whole batch is mapped before any request is made; a task that cannot
/// be mapped fails the call without touching the remote calendar.
pub async fn reconcile<S: CalendarService>(
    service: &S,
    tasks: &[Task],
    options: &ReconcileOptions,
) -> SyllabusResult<Vec<ReconciliationOutcome>> {
    let mapped = map_tasks(tasks, options.timezone)?;

    let mut outcomes = Vec::with_capacity(mapped.len());
    for task in &mapped {
        outcomes.push(reconcile_one(service, &options.calendar_id, task).await);
    }

    Ok(outcomes)
}

async fn reconcile_one<S: CalendarService>(
    service: &S,
    calendar_id: &str,
    task: &MappedTask,
) -> ReconciliationOutcome {
    let event_id = task.identity.event_id();
    let title = task.remote.summary.clone();
    let mut tier = Tier::Update;

    loop {
        debug!(identity = %event_id, %tier, "Writing event");

        let result = match tier {
            Tier::Update => service.update(calendar_id, &event_id, &task.remote).await,
            Tier::Insert => service.insert(calendar_id, &task.remote.without_id()).await,
            Tier::Import => service.import(calendar_id, &task.remote).await,
        };

        let err = match result {
            Ok(stored) => {
                debug!(identity = %event_id, remote_id = %stored.id, %tier, "Stored event");
                return ReconciliationOutcome::success(
                    event_id,
                    title,
                    tier.success_status(),
                    stored,
                );
            }
            Err(err) => err,
        };

        let kind = classify(&err);
        match tier.on_failure(kind) {
            Transition::Next(next) => {
                debug!(identity = %event_id, %tier, error = %err, "Falling back to {}", next);
                tier = next;
            }
            Transition::Fail => {
                let message = failure_message(tier, kind, &err);
                warn!(identity = %event_id, %tier, error = %err, "Failed to write event: {}", title);
                return ReconciliationOutcome::error(event_id, title, message);
            }
        }
    }
}

fn failure_message(tier: Tier, kind: FailureKind, err: &RemoteError) -> String {
    if tier == Tier::Update && kind == FailureKind::PermissionDenied {
        return tier::PERMISSION_DENIED_MESSAGE.to_string();
    }

    if err.message.trim().is_empty() {
        tier.fallback_message().to_string()
    } else {
        err.message.clone()
    }
}

/// Web URL that opens the target calendar.
pub fn calendar_url(calendar_id: &str) -> String {
    if calendar_id == PRIMARY_CALENDAR_ID {
        "https://calendar.google.com/calendar/u/0/r".to_string()
    } else {
        let cid: String = url::form_urlencoded::byte_serialize(calendar_id.as_bytes()).collect();
        format!("https://calendar.google.com/calendar/u/0/r?cid={}", cid)
    }
}
