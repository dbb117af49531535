pub mod config;
pub mod export;
pub mod ids;
pub mod inspect;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};
use syllabus_core::Task;
use syllabus_core::task::{dedupe, parse_tasks};
use tracing::debug;

/// Read a task list from disk and drop repeated tasks.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tasks from {}", path.display()))?;

    let tasks = parse_tasks(&json)
        .with_context(|| format!("Invalid task list in {}", path.display()))?;
    let total = tasks.len();
    let tasks = dedupe(tasks);

    if tasks.len() < total {
        debug!(dropped = total - tasks.len(), "Dropped duplicate tasks");
    }

    Ok(tasks)
}
