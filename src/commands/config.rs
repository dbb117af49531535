use anyhow::Result;
use owo_colors::OwoColorize;
use syllabus_core::config::SyncConfig;
use syllabus_provider_google::GoogleConfig;

pub fn run() -> Result<()> {
    let config_path = SyncConfig::config_path()?;
    let config = SyncConfig::load()?;
    let google = GoogleConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Google:  {}", google.dir().display());
    println!();
    println!("{}", "Effective config".bold());
    print!("{}", config.to_toml()?);
    println!("  {}", format!("resolved timezone: {}", config.resolved_timezone()?).dimmed());

    Ok(())
}
