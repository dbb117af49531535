//! Summaries of a reconciliation run.

use serde::Serialize;

use crate::reconcile::{OutcomeStatus, ReconciliationOutcome};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub inserted: usize,
    pub updated: usize,
    /// Error messages in task order.
    pub errors: Vec<String>,
    /// First link returned by the remote calendar, if any.
    pub first_link: Option<String>,
}

impl SyncSummary {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line, user-facing description of the run.
    pub fn message(&self) -> String {
        let counts = format!("Inserted {}, updated {}", self.inserted, self.updated);
        match self.errors.first() {
            None => format!("{counts}, 0 failed"),
            Some(first) => format!("{counts}, {} failed: {}", self.failed(), first),
        }
    }
}

pub fn summarize(outcomes: &[ReconciliationOutcome]) -> SyncSummary {
    outcomes
        .iter()
        .fold(SyncSummary::default(), |mut summary, outcome| {
            match outcome.status {
                OutcomeStatus::Inserted => summary.inserted += 1,
                OutcomeStatus::Updated => summary.updated += 1,
                OutcomeStatus::Error => summary.errors.push(
                    outcome
                        .message
                        .clone()
                        .unwrap_or_else(|| "unknown error".to_string()),
                ),
            }
            if summary.first_link.is_none() {
                summary.first_link = outcome.html_link.clone();
            }
            summary
        })
}
