use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use syllabus_core::config::SyncConfig;
use syllabus_core::reconcile::{ReconciliationOutcome, calendar_url, reconcile};
use syllabus_core::summary::{SyncSummary, summarize};
use syllabus_provider_google::{GoogleAuth, GoogleCalendar, GoogleConfig};
use tracing::info;

use crate::render::Render;

pub async fn run(
    tasks_path: &Path,
    calendar: Option<String>,
    timezone: Option<String>,
    json: bool,
) -> Result<()> {
    let mut config = SyncConfig::load()?;
    if let Some(calendar) = calendar {
        config.calendar_id = calendar;
    }
    if timezone.is_some() {
        config.timezone = timezone;
    }

    let options = config.reconcile_options()?;
    let tasks = super::load_tasks(tasks_path)?;

    if tasks.is_empty() {
        println!("{}", "No tasks to sync".dimmed());
        return Ok(());
    }

    let access_token = GoogleAuth::new(GoogleConfig::load()?).access_token().await?;
    let calendar = GoogleCalendar::new(access_token)?;

    info!(
        calendar = %options.calendar_id,
        timezone = %options.timezone,
        tasks = tasks.len(),
        "Syncing tasks"
    );

    let outcomes = reconcile(&calendar, &tasks, &options).await?;
    let summary = summarize(&outcomes);

    if json {
        let report = json_report(&outcomes, &summary, &options.calendar_id);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&outcomes, &summary, &options.calendar_id);
    }

    Ok(())
}

fn json_report(
    outcomes: &[ReconciliationOutcome],
    summary: &SyncSummary,
    calendar_id: &str,
) -> serde_json::Value {
    serde_json::json!({
        "results": outcomes,
        "summary": summary,
        "message": summary.message(),
        "calendarUrl": calendar_url(calendar_id),
    })
}

fn render_report(outcomes: &[ReconciliationOutcome], summary: &SyncSummary, calendar_id: &str) {
    for outcome in outcomes {
        println!("   {}", outcome.render());
    }

    println!("\n{}", summary.render());
    if let Some(link) = &summary.first_link {
        println!("   {}", link.dimmed());
    }
    println!("Open calendar: {}", calendar_url(calendar_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::reconcile::OutcomeStatus;

    #[test]
    fn test_json_report_uses_route_keys() {
        let outcomes = vec![ReconciliationOutcome {
            identity: "syl-abc".to_string(),
            title: "Midterm".to_string(),
            status: OutcomeStatus::Updated,
            remote_id: Some("syl-abc".to_string()),
            html_link: Some("https://calendar.google.com/event?eid=x".to_string()),
            message: None,
        }];
        let summary = summarize(&outcomes);

        let report = json_report(&outcomes, &summary, "primary");

        let result = &report["results"][0];
        assert_eq!(result["id"], "syl-abc");
        assert_eq!(result["status"], "updated");
        assert_eq!(result["htmlLink"], "https://calendar.google.com/event?eid=x");
        assert!(result.get("identity").is_none());
        assert!(result.get("html_link").is_none());

        assert_eq!(report["summary"]["firstLink"], "https://calendar.google.com/event?eid=x");
        assert_eq!(report["message"], "Inserted 0, updated 1, 0 failed");
        assert_eq!(report["calendarUrl"], "https://calendar.google.com/calendar/u/0/r");
    }
}
