//! Terminal rendering for sync results.

use owo_colors::OwoColorize;
use syllabus_core::Task;
use syllabus_core::reconcile::{OutcomeStatus, ReconciliationOutcome};
use syllabus_core::summary::SyncSummary;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for OutcomeStatus {
    fn render(&self) -> String {
        let symbol = self.to_string();
        match self {
            OutcomeStatus::Inserted => symbol.green().to_string(),
            OutcomeStatus::Updated => symbol.yellow().to_string(),
            OutcomeStatus::Error => symbol.red().to_string(),
        }
    }
}

impl Render for ReconciliationOutcome {
    fn render(&self) -> String {
        match &self.message {
            Some(message) if self.is_error() => format!(
                "{} {} {}",
                self.status.render(),
                self.title.red(),
                message.dimmed()
            ),
            _ => format!("{} {}", self.status.render(), self.title),
        }
    }
}

impl Render for SyncSummary {
    fn render(&self) -> String {
        if self.is_success() {
            self.message().green().to_string()
        } else {
            self.message().red().to_string()
        }
    }
}

/// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`.
pub fn render_task_time(task: &Task) -> String {
    match task.time {
        Some(time) => format!("{} {}", task.date.format("%Y-%m-%d"), time.format("%H:%M")),
        None => task.date.format("%Y-%m-%d").to_string(),
    }
}
