//! The task record extracted from a syllabus.
//!
//! Tasks arrive as JSON from the upstream extractor. The wire shape is loose
//! (string dates, optional or empty times, `notes` as a description alias),
//! so deserialization goes through [`TaskRecord`] and is converted into a
//! validated [`Task`] whose date and time are real calendar values.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{SyllabusError, SyllabusResult};

/// Class id used when the extractor did not tag a task.
pub const DEFAULT_CLASS_ID: &str = "general";

/// What kind of coursework a task is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Assignment,
    Reading,
    Exam,
    #[default]
    Other,
}

/// A validated, calendar-worthy task.
///
/// `time` is the only discriminator between timed and all-day tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub title: String,
    pub kind: TaskKind,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub class_id: String,
    pub source_page: Option<u32>,
}

impl Task {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Task {
            title: title.into(),
            kind: TaskKind::Other,
            date,
            time: None,
            description: None,
            location: None,
            link: None,
            class_id: DEFAULT_CLASS_ID.to_string(),
            source_page: None,
        }
    }

    pub fn at(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }

    /// Key used to drop repeated extractions of the same task within a class.
    fn dedupe_key(&self) -> (String, NaiveDate, String) {
        let class_id = if self.class_id.is_empty() {
            DEFAULT_CLASS_ID.to_string()
        } else {
            self.class_id.clone()
        };
        (class_id, self.date, self.title.to_lowercase())
    }
}

/// Wire form of a task, as produced by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    title: String,
    #[serde(rename = "type", default)]
    kind: TaskKind,
    date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing)]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default)]
    class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_page: Option<u32>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        if record.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }

        let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("date '{}' is not a valid YYYY-MM-DD date", record.date))?;

        let time = match record.time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_clock_time(raw)?),
        };

        Ok(Task {
            title: record.title,
            kind: record.kind,
            date,
            time,
            description: record.description.or(record.notes),
            location: record.location,
            link: record.link,
            class_id: record
                .class_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| DEFAULT_CLASS_ID.to_string()),
            source_page: record.source_page,
        })
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        TaskRecord {
            title: task.title,
            kind: task.kind,
            date: task.date.format("%Y-%m-%d").to_string(),
            time: task.time.map(|t| t.format("%H:%M").to_string()),
            description: task.description,
            notes: None,
            location: task.location,
            link: task.link,
            class_id: Some(task.class_id),
            source_page: task.source_page,
        }
    }
}

/// Read `HH:MM`, or `HH:MM:SS` with the seconds dropped.
///
/// Event identity keys on minutes, so a task must never carry seconds.
fn parse_clock_time(raw: &str) -> Result<NaiveTime, String> {
    let time = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("time '{}' is not a valid 24-hour HH:MM time", raw))?;

    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
        .ok_or_else(|| format!("time '{}' is out of range", raw))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskList {
    Bare(Vec<serde_json::Value>),
    Envelope { tasks: Vec<serde_json::Value> },
}

/// Parse a task list from JSON.
///
/// Accepts a bare array or the extractor's `{ "tasks": [...] }` envelope.
/// The first malformed record fails the whole batch.
pub fn parse_tasks(json: &str) -> SyllabusResult<Vec<Task>> {
    let list: TaskList = serde_json::from_str(json).map_err(|e| {
        SyllabusError::TaskParse(format!("expected a task array or {{\"tasks\": [...]}}: {e}"))
    })?;

    let values = match list {
        TaskList::Bare(values) => values,
        TaskList::Envelope { tasks } => tasks,
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<Task>(value).map_err(|e| SyllabusError::InvalidTask {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Drop tasks already seen under the same `(class, date, title)` key.
///
/// Titles compare case-insensitively. The first occurrence wins and order is
/// preserved.
pub fn dedupe(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    tasks
        .into_iter()
        .filter(|task| seen.insert(task.dedupe_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope_and_bare_array() {
        let envelope = r#"{"tasks":[{"title":"Read ch. 1","type":"reading","date":"2025-03-10","classId":"torts"}]}"#;
        let bare = r#"[{"title":"Read ch. 1","type":"reading","date":"2025-03-10","classId":"torts"}]"#;

        let a = parse_tasks(envelope).unwrap();
        let b = parse_tasks(bare).unwrap();

        assert_eq!(a, b);
        assert_eq!(a[0].kind, TaskKind::Reading);
        assert_eq!(a[0].class_id, "torts");
        assert!(a[0].is_all_day());
    }

    #[test]
    fn test_empty_and_null_time_mean_all_day() {
        let json = r#"[
            {"title":"A","date":"2025-03-10","time":""},
            {"title":"B","date":"2025-03-10","time":null},
            {"title":"C","date":"2025-03-10","time":"14:30"}
        ]"#;
        let tasks = parse_tasks(json).unwrap();

        assert!(tasks[0].is_all_day());
        assert!(tasks[1].is_all_day());
        assert_eq!(tasks[2].time, NaiveTime::from_hms_opt(14, 30, 0));
    }

    #[test]
    fn test_seconds_are_dropped_from_time() {
        let json = r#"[
            {"title":"Exam","date":"2025-03-10","time":"14:30:45"},
            {"title":"Exam","date":"2025-03-10","time":"14:30"}
        ]"#;
        let tasks = parse_tasks(json).unwrap();

        assert_eq!(tasks[0].time, NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(tasks[0], tasks[1]);
        assert_eq!(
            crate::identity::Identity::of(&tasks[0]),
            crate::identity::Identity::of(&tasks[1])
        );
    }

    #[test]
    fn test_notes_used_when_description_missing() {
        let json = r#"[{"title":"Memo","date":"2025-03-10","notes":"Bring outline"}]"#;
        let tasks = parse_tasks(json).unwrap();
        assert_eq!(tasks[0].description.as_deref(), Some("Bring outline"));
        assert_eq!(tasks[0].class_id, DEFAULT_CLASS_ID);
    }

    #[test]
    fn test_invalid_record_fails_batch_with_index() {
        let json = r#"[
            {"title":"Fine","date":"2025-03-10"},
            {"title":"Bad date","date":"2025-02-30"}
        ]"#;

        match parse_tasks(json) {
            Err(SyllabusError::InvalidTask { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("2025-02-30"), "reason: {}", reason);
            }
            other => panic!("expected InvalidTask, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_time_and_blank_title_rejected() {
        assert!(parse_tasks(r#"[{"title":"X","date":"2025-03-10","time":"25:00"}]"#).is_err());
        assert!(parse_tasks(r#"[{"title":"   ","date":"2025-03-10"}]"#).is_err());
    }

    #[test]
    fn test_serialize_uses_wire_format() {
        let task = Task::new("Exam", NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
            .at(NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["date"], "2025-03-10");
        assert_eq!(json["time"], "09:05");
        assert_eq!(json["type"], "other");
        assert_eq!(json["classId"], "general");
    }

    #[test]
    fn test_dedupe_scopes_by_class_and_ignores_title_case() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut other_class = Task::new("Midterm", date);
        other_class.class_id = "contracts".to_string();

        let tasks = vec![
            Task::new("Midterm", date),
            Task::new("MIDTERM", date),
            other_class,
            Task::new("Midterm", date.succ_opt().unwrap()),
        ];

        let deduped = dedupe(tasks);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].title, "Midterm");
        assert_eq!(deduped[1].class_id, "contracts");
    }
}
