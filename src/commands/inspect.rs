use std::path::Path;

use anyhow::{Context, Result};
use syllabus_core::ics::parse_document;

pub fn run(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let tasks = parse_document(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    println!("{}", serde_json::to_string_pretty(&tasks)?);

    Ok(())
}
