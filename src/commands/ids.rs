use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use syllabus_core::Identity;

use crate::render::render_task_time;

pub fn run(tasks_path: &Path) -> Result<()> {
    for task in super::load_tasks(tasks_path)? {
        let identity = Identity::of(&task);
        println!("{} {}", task.title.bold(), render_task_time(&task).dimmed());
        println!("   id:  {}", identity.event_id());
        println!("   uid: {}", identity.uid());
    }

    Ok(())
}
