//! Stable identities for tasks.
//!
//! The same `(title, date, time)` always yields the same identity, across
//! runs and machines. The external form doubles as the remote event id, so
//! re-syncing a task overwrites its event instead of creating a second one.

use chrono::{NaiveDate, NaiveTime};
use sha2::{Digest, Sha256};

use crate::task::Task;

/// Prefix for remote event ids.
const EVENT_ID_PREFIX: &str = "syl-";

/// Namespace appended to the ICS UID.
const UID_NAMESPACE: &str = "@syllabus-sync";

/// Number of hex digits kept from the digest (160 bits).
const DIGEST_HEX_LEN: usize = 40;

/// Identity derived from a task's title, date and time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    digest: String,
}

impl Identity {
    pub fn derive(title: &str, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        let time = time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default();
        let key = format!("{}|{}|{}", title.trim(), date.format("%Y-%m-%d"), time);

        let hash = Sha256::digest(key.as_bytes());
        let mut digest = hex::encode(hash);
        digest.truncate(DIGEST_HEX_LEN);

        Identity { digest }
    }

    pub fn of(task: &Task) -> Self {
        Self::derive(&task.title, task.date, task.time)
    }

    /// Id safe for services that only accept `[a-z0-9-]`.
    pub fn event_id(&self) -> String {
        format!("{EVENT_ID_PREFIX}{}", self.digest)
    }

    /// Key used as the ICS `UID`.
    pub fn uid(&self) -> String {
        format!("{}{UID_NAMESPACE}", self.digest)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.event_id())
    }
}
