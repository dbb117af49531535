use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use syllabus_core::config::SyncConfig;
use syllabus_core::export::export_document;
use tracing::debug;

pub fn run(tasks_path: &Path, output: Option<&Path>) -> Result<()> {
    let config = SyncConfig::load()?;
    let tasks = super::load_tasks(tasks_path)?;

    let export = export_document(&tasks, &config.export_options(), Utc::now())?;
    debug!(
        content_type = export.content_type,
        content_disposition = %export.content_disposition,
        cache_control = export.cache_control,
        "Encoded calendar"
    );

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.export_filename));

    std::fs::write(&path, &export.body)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "Exported {} {} to {}",
        tasks.len(),
        if tasks.len() == 1 { "task" } else { "tasks" },
        path.display().bold()
    );

    Ok(())
}
