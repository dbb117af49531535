//! Error types for syllabus-sync.

use thiserror::Error;

/// Errors that abort a whole operation (parsing, export, configuration).
///
/// Per-task failures against the remote calendar are not represented here;
/// they are captured in [`crate::reconcile::ReconciliationOutcome`].
#[derive(Error, Debug)]
pub enum SyllabusError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid task at index {index}: {reason}")]
    InvalidTask { index: usize, reason: String },

    #[error("Cannot map task '{title}': {reason}")]
    Mapping { title: String, reason: String },

    #[error("Task list parse error: {0}")]
    TaskParse(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for syllabus-sync operations.
pub type SyllabusResult<T> = Result<T, SyllabusError>;
