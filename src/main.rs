mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_FILTER: &str = "syllabus_sync=info,syllabus_core=info,syllabus_provider_google=info";
const VERBOSE_LOG_FILTER: &str =
    "syllabus_sync=debug,syllabus_core=debug,syllabus_provider_google=debug";

#[derive(Parser)]
#[command(name = "syllabus-sync")]
#[command(about = "Turn syllabus task lists into calendar events")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write tasks to an .ics file
    Export {
        /// Task list (JSON array or {"tasks": [...]})
        tasks: PathBuf,

        /// Output file (defaults to export_filename from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create or update tasks as events in Google Calendar
    Sync {
        tasks: PathBuf,

        /// Calendar to write to (defaults to calendar_id from config)
        #[arg(short, long)]
        calendar: Option<String>,

        /// IANA timezone for timed events (e.g. "America/Chicago")
        #[arg(long)]
        timezone: Option<String>,

        /// Print per-task results and the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the event id each task maps to
    Ids { tasks: PathBuf },
    /// List the events in an .ics file as tasks
    Inspect { file: PathBuf },
    /// Show the effective configuration and where it is read from
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Export { tasks, output } => commands::export::run(&tasks, output.as_deref()),
        Commands::Sync {
            tasks,
            calendar,
            timezone,
            json,
        } => commands::sync::run(&tasks, calendar, timezone, json).await,
        Commands::Ids { tasks } => commands::ids::run(&tasks),
        Commands::Inspect { file } => commands::inspect::run(&file),
        Commands::Config => commands::config::run(),
    }
}
