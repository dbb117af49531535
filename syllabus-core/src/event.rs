//! Mapping tasks onto calendar events.
//!
//! A task becomes two representations: an [`IcsEvent`] for the exported
//! document and a [`RemoteEvent`] body for the remote calendar API. Both are
//! built from the same start/end pair so they can never disagree on timing.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::error::{SyllabusError, SyllabusResult};
use crate::identity::Identity;
use crate::task::Task;

/// Length of a timed event. Tasks carry no end time.
const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Title of the remote `source` attachment that carries a task's link.
const SOURCE_TITLE: &str = "Resource";

/// Start or end of a mapped event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// All-day value. As an end, it is exclusive.
    Date(NaiveDate),
    /// Local wall-clock time with no zone attached.
    Floating(NaiveDateTime),
}

/// Interchange (ICS) form of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsEvent {
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// Remote calendar event body, serialized as the Calendar v3 JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Same value as the ICS `UID`. Required by the import operation.
    #[serde(rename = "iCalUID")]
    pub ical_uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,
    pub start: RemoteTime,
    pub end: RemoteTime,
    pub reminders: Reminders,
}

impl RemoteEvent {
    /// Copy of this body with no client-supplied id.
    pub fn without_id(&self) -> Self {
        RemoteEvent {
            id: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RemoteTime {
    Date {
        #[serde(serialize_with = "serialize_date")]
        date: NaiveDate,
    },
    DateTime {
        #[serde(rename = "dateTime", serialize_with = "serialize_local_datetime")]
        date_time: NaiveDateTime,
        #[serde(rename = "timeZone")]
        time_zone: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
}

fn serialize_date<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%d"))
}

fn serialize_local_datetime<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&dt.format("%Y-%m-%dT%H:%M:%S"))
}

/// Both representations of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedTask {
    pub identity: Identity,
    pub remote: RemoteEvent,
    pub ics: IcsEvent,
}

/// Map a task to its remote body and ICS block.
///
/// Timed tasks last one hour. All-day tasks end on the following date since
/// the end of an all-day span is exclusive.
pub fn map_task(task: &Task, timezone: Tz) -> SyllabusResult<MappedTask> {
    let identity = Identity::of(task);
    let (start, end) = event_span(task)?;

    let ics = IcsEvent {
        uid: identity.uid(),
        summary: task.title.clone(),
        description: task.description.clone(),
        location: task.location.clone(),
        url: task.link.clone(),
        start,
        end,
    };

    let remote = RemoteEvent {
        id: Some(identity.event_id()),
        ical_uid: identity.uid(),
        summary: task.title.clone(),
        description: task.description.clone().unwrap_or_default(),
        location: task.location.clone().unwrap_or_default(),
        source: task.link.as_ref().map(|url| EventSource {
            title: SOURCE_TITLE.to_string(),
            url: url.clone(),
        }),
        start: remote_time(start, timezone),
        end: remote_time(end, timezone),
        reminders: Reminders { use_default: true },
    };

    Ok(MappedTask {
        identity,
        remote,
        ics,
    })
}

/// Map a whole batch. The first failure aborts the batch.
pub fn map_tasks(tasks: &[Task], timezone: Tz) -> SyllabusResult<Vec<MappedTask>> {
    tasks.iter().map(|task| map_task(task, timezone)).collect()
}

fn event_span(task: &Task) -> SyllabusResult<(EventTime, EventTime)> {
    let overflow = |what: &str| SyllabusError::Mapping {
        title: task.title.clone(),
        reason: format!("{what} is out of the supported date range"),
    };

    match task.time {
        Some(time) => {
            let start = task.date.and_time(time);
            let end = start
                .checked_add_signed(TimeDelta::minutes(DEFAULT_DURATION_MINUTES))
                .ok_or_else(|| overflow("end time"))?;
            Ok((EventTime::Floating(start), EventTime::Floating(end)))
        }
        None => {
            let end = task.date.succ_opt().ok_or_else(|| overflow("end date"))?;
            Ok((EventTime::Date(task.date), EventTime::Date(end)))
        }
    }
}

fn remote_time(time: EventTime, timezone: Tz) -> RemoteTime {
    match time {
        EventTime::Date(date) => RemoteTime::Date { date },
        EventTime::Floating(date_time) => RemoteTime::DateTime {
            date_time,
            time_zone: timezone.name().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_all_day_end_is_exclusive() {
        let task = Task::new("Reading", date(2025, 3, 10));
        let mapped = map_task(&task, chrono_tz::America::Chicago).unwrap();

        assert_eq!(mapped.ics.start, EventTime::Date(date(2025, 3, 10)));
        assert_eq!(mapped.ics.end, EventTime::Date(date(2025, 3, 11)));
        assert_eq!(mapped.remote.end, RemoteTime::Date { date: date(2025, 3, 11) });
    }

    #[test]
    fn test_timed_default_duration() {
        let task = Task::new("Exam", date(2025, 3, 10)).at(time(14, 30));
        let mapped = map_task(&task, chrono_tz::America::Chicago).unwrap();

        assert_eq!(
            mapped.ics.end,
            EventTime::Floating(date(2025, 3, 10).and_time(time(15, 30)))
        );

        let body = serde_json::to_value(&mapped.remote).unwrap();
        assert_eq!(body["start"]["dateTime"], "2025-03-10T14:30:00");
        assert_eq!(body["end"]["dateTime"], "2025-03-10T15:30:00");
        assert_eq!(body["end"]["timeZone"], "America/Chicago");
    }

    #[test]
    fn test_late_start_rolls_end_to_next_day() {
        let task = Task::new("Late quiz", date(2025, 12, 31)).at(time(23, 30));
        let mapped = map_task(&task, chrono_tz::UTC).unwrap();

        assert_eq!(
            mapped.ics.end,
            EventTime::Floating(date(2026, 1, 1).and_time(time(0, 30)))
        );
    }

    #[test]
    fn test_remote_body_shape() {
        let mut task = Task::new("Memo", date(2025, 3, 10));
        task.link = Some("https://example.edu/memo".to_string());
        let mapped = map_task(&task, chrono_tz::UTC).unwrap();

        let body = serde_json::to_value(&mapped.remote).unwrap();
        assert_eq!(body["id"], mapped.identity.event_id());
        assert_eq!(body["iCalUID"], mapped.identity.uid());
        assert_eq!(body["description"], "");
        assert_eq!(body["location"], "");
        assert_eq!(body["source"]["url"], "https://example.edu/memo");
        assert_eq!(body["start"]["date"], "2025-03-10");
        assert!(body["start"].get("timeZone").is_none());
        assert_eq!(body["reminders"]["useDefault"], true);
    }

    #[test]
    fn test_source_omitted_without_link_and_id_dropped_for_insert() {
        let task = Task::new("Memo", date(2025, 3, 10));
        let mapped = map_task(&task, chrono_tz::UTC).unwrap();

        let body = serde_json::to_value(mapped.remote.without_id()).unwrap();
        assert!(body.get("source").is_none());
        assert!(body.get("id").is_none());
        assert_eq!(body["iCalUID"], mapped.identity.uid());
    }

    #[test]
    fn test_ics_block_carries_uid_and_optional_fields() {
        let mut task = Task::new("Memo", date(2025, 3, 10));
        task.location = Some("Room 101".to_string());
        let mapped = map_task(&task, chrono_tz::UTC).unwrap();

        assert_eq!(mapped.ics.uid, mapped.identity.uid());
        assert_eq!(mapped.ics.location.as_deref(), Some("Room 101"));
        assert_eq!(mapped.ics.description, None);
        assert_eq!(mapped.ics.url, None);
    }

    #[test]
    fn test_last_representable_date_fails_batch() {
        let tasks = vec![
            Task::new("Fine", date(2025, 3, 10)),
            Task::new("Too far", NaiveDate::MAX),
        ];
        assert!(matches!(
            map_tasks(&tasks, chrono_tz::UTC),
            Err(SyllabusError::Mapping { .. })
        ));
    }
}
