//! ICS document generation and parsing.
//!
//! Documents are built and read with the `icalendar` crate, which owns
//! RFC 5545 escaping and line folding.

mod generate;
mod parse;

pub use generate::{CalendarHeader, encode};
pub use parse::parse_document;
