//! ICS document parsing using the icalendar crate's parser.
//!
//! Reads the events of a document back into tasks. Only the properties the
//! encoder writes are interpreted; everything else is ignored.

use chrono::{NaiveDate, NaiveTime};
use icalendar::{Calendar, CalendarDateTime, Component, DatePerhapsTime, EventLike};

use crate::error::{SyllabusError, SyllabusResult};
use crate::task::Task;

/// Parse every `VEVENT` of a document into a task.
pub fn parse_document(content: &str) -> SyllabusResult<Vec<Task>> {
    let calendar: Calendar = content.parse().map_err(SyllabusError::IcsParse)?;

    calendar
        .events()
        .enumerate()
        .map(|(index, event)| task_from_event(event, index))
        .collect()
}

fn task_from_event(event: &icalendar::Event, index: usize) -> SyllabusResult<Task> {
    let summary = event
        .get_summary()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("(No title)");

    let (date, time) = event
        .get_start()
        .map(split_start)
        .ok_or_else(|| SyllabusError::IcsParse(format!("event {} has no readable DTSTART", index)))?;

    let mut task = Task::new(summary, date);
    task.time = time;
    task.description = event.get_description().map(str::to_string);
    task.location = event.get_location().map(str::to_string);
    task.link = event.get_url().map(str::to_string);

    Ok(task)
}

/// Split a start into a date and optional wall-clock time.
///
/// UTC and TZID-qualified values keep their written wall-clock time.
fn split_start(start: DatePerhapsTime) -> (NaiveDate, Option<NaiveTime>) {
    match start {
        DatePerhapsTime::Date(d) => (d, None),
        DatePerhapsTime::DateTime(cal_dt) => {
            let naive = match cal_dt {
                CalendarDateTime::Utc(dt) => dt.naive_utc(),
                CalendarDateTime::Floating(naive) => naive,
                CalendarDateTime::WithTimezone { date_time, .. } => date_time,
            };
            (naive.date(), Some(naive.time()))
        }
    }
}
