//! The download surface: task list in, ICS document plus headers out.

use chrono::{DateTime, Utc};

use crate::error::SyllabusResult;
use crate::event::{IcsEvent, map_tasks};
use crate::ics::{CalendarHeader, encode};
use crate::task::Task;

pub const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
pub const NO_STORE: &str = "no-store";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub header: CalendarHeader,
    /// Suggested download file name.
    pub filename: String,
}

/// An exported document with the headers it should be served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsExport {
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub content_disposition: String,
    pub cache_control: &'static str,
}

/// Map and encode `tasks` into a single document.
///
/// Any task that cannot be mapped fails the export; a partial document is
/// never returned.
pub fn export_document(
    tasks: &[Task],
    options: &ExportOptions,
    generated_at: DateTime<Utc>,
) -> SyllabusResult<IcsExport> {
    // Floating times in the document carry no zone, so the zone passed to the
    // mapper only affects the remote body, which is dropped here.
    let events: Vec<IcsEvent> = map_tasks(tasks, chrono_tz::UTC)?
        .into_iter()
        .map(|mapped| mapped.ics)
        .collect();

    let document = encode(&events, &options.header, generated_at);

    Ok(IcsExport {
        body: document.into_bytes(),
        content_type: ICS_CONTENT_TYPE,
        content_disposition: format!(
            "attachment; filename=\"{}\"",
            options.filename.replace(['"', '\\'], "_")
        ),
        cache_control: NO_STORE,
    })
}
