//! ICS document generation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::event::{EventTime, IcsEvent};

/// Calendar-level properties written before the events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarHeader {
    pub product_id: String,
    /// Emitted as `X-WR-CALNAME` (de facto standard) when set.
    pub calendar_name: Option<String>,
}

impl Default for CalendarHeader {
    fn default() -> Self {
        CalendarHeader {
            product_id: crate::config::DEFAULT_PRODUCT_ID.to_string(),
            calendar_name: None,
        }
    }
}

/// Encode events into an ICS document.
///
/// `generated_at` becomes every event's `DTSTAMP`, so the output is fully
/// determined by the arguments.
pub fn encode(events: &[IcsEvent], header: &CalendarHeader, generated_at: DateTime<Utc>) -> String {
    let dtstamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    // Calendar::new() would prefill PRODID:ICALENDAR-RS
    let mut cal = Calendar::empty();
    cal.append_property(Property::new("VERSION", "2.0"));
    cal.append_property(Property::new("PRODID", header.product_id.as_str()));
    cal.append_property(Property::new("CALSCALE", "GREGORIAN"));
    cal.append_property(Property::new("METHOD", "PUBLISH"));

    if let Some(ref name) = header.calendar_name {
        cal.append_property(Property::new("X-WR-CALNAME", name.as_str()));
    }

    for event in events {
        cal.push(build_event(event, &dtstamp));
    }

    cal.done().to_string()
}

fn build_event(event: &IcsEvent, dtstamp: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();

    ics_event.uid(&event.uid);
    ics_event.add_property("DTSTAMP", dtstamp);
    ics_event.summary(&normalize_breaks(&event.summary));
    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    add_datetime_property(&mut ics_event, "DTEND", &event.end);

    if let Some(ref desc) = event.description {
        ics_event.description(&normalize_breaks(desc));
    }

    if let Some(ref loc) = event.location {
        ics_event.location(&normalize_breaks(loc));
    }

    // URL is a URI value and is written unescaped, so a line break would end
    // the property early.
    if let Some(ref url) = event.url {
        ics_event.url(&url.replace(['\r', '\n'], ""));
    }

    ics_event.done()
}

/// Add a start/end property.
///
/// Dates carry `VALUE=DATE`; date-times are floating so the importing
/// application reads them in its own zone.
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::Floating(dt) => {
            ics_event.add_property(name, dt.format("%Y%m%dT%H%M%S").to_string());
        }
    }
}

/// The TEXT escaper only knows `\n`; CRLF and lone CR become `\n` first.
fn normalize_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}
