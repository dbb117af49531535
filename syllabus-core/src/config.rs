//! syllabus-sync configuration.
//!
//! Loaded from ~/.config/syllabus-sync/config.toml, then `SYLLABUS_*`
//! environment variables. CLI flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{SyllabusError, SyllabusResult};
use crate::export::ExportOptions;
use crate::ics::CalendarHeader;
use crate::reconcile::{PRIMARY_CALENDAR_ID, ReconcileOptions};

pub const DEFAULT_PRODUCT_ID: &str = "-//syllabus-sync//EN";

/// Zone used when neither the config nor the host names one.
const FALLBACK_TIMEZONE: Tz = chrono_tz::America::Chicago;

static DEFAULT_CALENDAR_NAME: &str = "Syllabus";
static DEFAULT_EXPORT_FILENAME: &str = "syllabus.ics";

fn default_calendar_id() -> String {
    PRIMARY_CALENDAR_ID.to_string()
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

fn default_product_id() -> String {
    DEFAULT_PRODUCT_ID.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// IANA zone for timed events sent to the remote calendar. Defaults to
    /// the host zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    #[serde(default = "default_export_filename")]
    pub export_filename: String,

    #[serde(default = "default_product_id")]
    pub product_id: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            timezone: None,
            calendar_id: default_calendar_id(),
            calendar_name: default_calendar_name(),
            export_filename: default_export_filename(),
            product_id: default_product_id(),
        }
    }
}

impl SyncConfig {
    pub fn config_dir() -> SyllabusResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| SyllabusError::Config("Could not determine config directory".into()))?
            .join("syllabus-sync"))
    }

    pub fn config_path() -> SyllabusResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the user's config, creating a commented default file first if
    /// there is none.
    pub fn load() -> SyllabusResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) with environment overrides.
    pub fn load_from(path: &Path) -> SyllabusResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("SYLLABUS"))
            .build()
            .map_err(|e| SyllabusError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SyllabusError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SyllabusResult<()> {
        let contents = format!(
            "\
# syllabus-sync configuration

# Timezone for timed events (defaults to this machine's zone):
# timezone = \"America/Chicago\"

# Calendar to sync into:
# calendar_id = \"{}\"

# Calendar name shown by apps importing the .ics export:
# calendar_name = \"{}\"

# Default file name for exports:
# export_filename = \"{}\"
",
            PRIMARY_CALENDAR_ID, DEFAULT_CALENDAR_NAME, DEFAULT_EXPORT_FILENAME
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Effective config as TOML.
    pub fn to_toml(&self) -> SyllabusResult<String> {
        toml::to_string_pretty(self).map_err(|e| SyllabusError::Serialization(e.to_string()))
    }

    pub fn resolved_timezone(&self) -> SyllabusResult<Tz> {
        resolve_timezone(self.timezone.as_deref())
    }

    pub fn header(&self) -> CalendarHeader {
        CalendarHeader {
            product_id: self.product_id.clone(),
            calendar_name: Some(self.calendar_name.clone()),
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            header: self.header(),
            filename: self.export_filename.clone(),
        }
    }

    pub fn reconcile_options(&self) -> SyllabusResult<ReconcileOptions> {
        Ok(ReconcileOptions {
            calendar_id: self.calendar_id.clone(),
            timezone: self.resolved_timezone()?,
        })
    }
}

/// Resolve a zone name, falling back to the host zone when none is given.
pub fn resolve_timezone(name: Option<&str>) -> SyllabusResult<Tz> {
    match name {
        Some(name) => name
            .trim()
            .parse::<Tz>()
            .map_err(|_| SyllabusError::InvalidTimezone(name.to_string())),
        None => Ok(host_timezone()),
    }
}

fn host_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(FALLBACK_TIMEZONE)
}
