//! The per-task fallback state machine.
//!
//! `Update -> Insert -> Import`, then done. Transitions depend only on the
//! current tier and the classified failure, so they are testable without a
//! service. Only an update failure can end the chain early.

use super::outcome::OutcomeStatus;
use super::service::FailureKind;

pub(crate) const PERMISSION_DENIED_MESSAGE: &str = "The calendar service returned 403 (insufficient permissions). \
     The saved authorization is stale or does not grant calendar write access. \
     Revoke this app at myaccount.google.com > Security > Third-party access, then sign in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Overwrite the event stored under the derived identity.
    Update,
    /// Create the event without a client-supplied id.
    Insert,
    /// Create the event keeping the client-supplied id.
    Import,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next(Tier),
    Fail,
}

impl Tier {
    pub fn on_failure(self, kind: FailureKind) -> Transition {
        match (self, kind) {
            (Tier::Update, FailureKind::NotFound | FailureKind::InvalidId) => {
                Transition::Next(Tier::Insert)
            }
            (Tier::Update, FailureKind::PermissionDenied | FailureKind::Other) => Transition::Fail,
            // Any insert failure, 403 included, is retried as an import.
            (Tier::Insert, _) => Transition::Next(Tier::Import),
            (Tier::Import, _) => Transition::Fail,
        }
    }

    pub fn success_status(self) -> OutcomeStatus {
        match self {
            Tier::Update => OutcomeStatus::Updated,
            Tier::Insert | Tier::Import => OutcomeStatus::Inserted,
        }
    }

    /// Message used when the service gave no message of its own.
    pub(crate) fn fallback_message(self) -> &'static str {
        match self {
            Tier::Update => "update failed",
            Tier::Insert | Tier::Import => "insert/import failed",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Update => write!(f, "update"),
            Tier::Insert => write!(f, "insert"),
            Tier::Import => write!(f, "import"),
        }
    }
}
