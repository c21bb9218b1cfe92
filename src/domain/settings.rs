//! Typed checklist settings built from validated configuration.

use crate::domain::config_validation::{parse_instruments, validate_checklist_config};
use crate::domain::error::TradecheckError;
use crate::domain::persistence::{DEFAULT_NOTES_KEY, DEFAULT_SETUP_KEY};
use crate::domain::selection::Direction;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_INSTRUMENT: &str = "XAUUSD";
pub const DEFAULT_DASHBOARD_PREFIX: &str = "Trading-Analysis-Dashboard";
pub const DEFAULT_SUMMARY_PREFIX: &str = "Trading-Summary";
pub const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupDefaults {
    pub instrument: String,
    pub direction: Direction,
    /// Instruments offered for selection.
    pub instruments: Vec<String>,
}

impl Default for SetupDefaults {
    fn default() -> Self {
        Self {
            instrument: DEFAULT_INSTRUMENT.to_string(),
            direction: Direction::Buy,
            instruments: vec![DEFAULT_INSTRUMENT.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub path: Option<PathBuf>,
    pub setup_key: String,
    pub notes_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: None,
            setup_key: DEFAULT_SETUP_KEY.to_string(),
            notes_key: DEFAULT_NOTES_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub dashboard_prefix: String,
    pub summary_prefix: String,
    pub extension: String,
    /// Custom report markup; the built-in template when `None`.
    pub template: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            dashboard_prefix: DEFAULT_DASHBOARD_PREFIX.to_string(),
            summary_prefix: DEFAULT_SUMMARY_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            template: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub setup: SetupDefaults,
    pub storage: StorageSettings,
    pub export: ExportSettings,
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradecheckError> {
        validate_checklist_config(config)?;

        let instrument = config
            .get_string("setup", "instrument")
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_else(|| DEFAULT_INSTRUMENT.to_string());
        let direction = match config.get_string("setup", "direction") {
            Some(value) => value.parse()?,
            None => Direction::Buy,
        };
        let instruments = match config.get_string("setup", "instruments") {
            Some(list) => parse_instruments(&list)?,
            None => vec![instrument.clone()],
        };

        let backend = match config
            .get_string("storage", "backend")
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("file") => StorageBackend::File,
            Some("sqlite") => StorageBackend::Sqlite,
            _ => StorageBackend::Memory,
        };
        let storage = StorageSettings {
            backend,
            path: config.get_string("storage", "path").map(PathBuf::from),
            setup_key: config
                .get_string("storage", "setup_key")
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| DEFAULT_SETUP_KEY.to_string()),
            notes_key: config
                .get_string("storage", "notes_key")
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| DEFAULT_NOTES_KEY.to_string()),
        };

        let export = ExportSettings {
            dashboard_prefix: config
                .get_string("export", "dashboard_prefix")
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| DEFAULT_DASHBOARD_PREFIX.to_string()),
            summary_prefix: config
                .get_string("export", "summary_prefix")
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| DEFAULT_SUMMARY_PREFIX.to_string()),
            extension: config
                .get_string("export", "extension")
                .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            template: config
                .get_string("export", "template")
                .map(|s| PathBuf::from(s.trim())),
        };

        Ok(Self {
            setup: SetupDefaults {
                instrument,
                direction,
                instruments,
            },
            storage,
            export,
        })
    }
}
