//! Configuration validation.
//!
//! Validates every checklist config field before [`Settings`] is built.
//!
//! [`Settings`]: crate::domain::settings::Settings

use crate::domain::error::TradecheckError;
use crate::domain::selection::Direction;
use crate::ports::config_port::ConfigPort;

pub fn validate_checklist_config(config: &dyn ConfigPort) -> Result<(), TradecheckError> {
    validate_instrument(config)?;
    validate_direction(config)?;
    validate_storage_backend(config)?;
    validate_storage_keys(config)?;
    validate_export(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> TradecheckError {
    TradecheckError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Comma-separated instrument list, trimmed and upper-cased.
pub fn parse_instruments(input: &str) -> Result<Vec<String>, TradecheckError> {
    let mut instruments: Vec<String> = Vec::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(invalid("setup", "instruments", "empty entry in instrument list"));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                "setup",
                "instruments",
                format!("instrument {trimmed} may only contain letters, digits, - and _"),
            ));
        }
        let instrument = trimmed.to_uppercase();
        if instruments.contains(&instrument) {
            return Err(invalid(
                "setup",
                "instruments",
                format!("duplicate instrument {instrument}"),
            ));
        }
        instruments.push(instrument);
    }
    Ok(instruments)
}

fn validate_instrument(config: &dyn ConfigPort) -> Result<(), TradecheckError> {
    let instrument = config.get_string("setup", "instrument");
    if let Some(value) = &instrument {
        if value.trim().is_empty() {
            return Err(invalid("setup", "instrument", "instrument must not be empty"));
        }
        parse_instruments(value).map_err(|_| {
            invalid(
                "setup",
                "instrument",
                "instrument may only contain letters, digits, - and _",
            )
        })?;
    }
    if let Some(list) = config.get_string("setup", "instruments") {
        let instruments = parse_instruments(&list)?;
        if let Some(value) = instrument {
            let value = value.trim().to_uppercase();
            if !instruments.contains(&value) {
                return Err(invalid(
                    "setup",
                    "instrument",
                    format!("{value} is not in the instruments list"),
                ));
            }
        }
    }
    Ok(())
}

fn validate_direction(config: &dyn ConfigPort) -> Result<(), TradecheckError> {
    match config.get_string("setup", "direction") {
        Some(value) => value
            .parse::<Direction>()
            .map(|_| ())
            .map_err(|_| invalid("setup", "direction", "direction must be buy or sell")),
        None => Ok(()),
    }
}

fn validate_storage_backend(config: &dyn ConfigPort) -> Result<(), TradecheckError> {
    let backend = config
        .get_string("storage", "backend")
        .unwrap_or_else(|| "memory".to_string())
        .to_lowercase();
    match backend.as_str() {
        "memory" => Ok(()),
        "file" | "sqlite" => {
            if backend == "sqlite" && !cfg!(feature = "sqlite") {
                return Err(invalid(
                    "storage",
                    "backend",
                    "sqlite support is not compiled in",
                ));
            }
            match config.get_string("storage", "path") {
                Some(path) if !path.trim().is_empty() => Ok(()),
                _ => Err(TradecheckError::ConfigMissing {
                    section: "storage".to_string(),
                    key: "path".to_string(),
                }),
            }
        }
        other => Err(invalid(
            "storage",
            "backend",
            format!("unsupported backend {other:?}, expected memory, file or sqlite"),
        )),
    }
}

fn validate_storage_keys(config: &dyn ConfigPort) -> Result<(), TradecheckError> {
    let setup_key = config.get_string("storage", "setup_key");
    let notes_key = config.get_string("storage", "notes_key");
    for (key, value) in [("setup_key", &setup_key), ("notes_key", &notes_key)] {
        if let Some(v) = value {
            if v.trim().is_empty() {
                return Err(invalid("storage", key, "storage key must not be empty"));
            }
        }
    }
    if let (Some(s), Some(n)) = (&setup_key, &notes_key) {
        if s.trim() == n.trim() {
            return Err(invalid(
                "storage",
                "notes_key",
                "notes_key must differ from setup_key",
            ));
        }
    }
    Ok(())
}

fn validate_export(config: &dyn ConfigPort) -> Result<(), TradecheckError> {
    for key in ["dashboard_prefix", "summary_prefix"] {
        if let Some(prefix) = config.get_string("export", key) {
            if prefix.trim().is_empty() {
                return Err(invalid("export", key, "prefix must not be empty"));
            }
            if prefix.contains(['/', '\\']) {
                return Err(invalid("export", key, "prefix must not contain path separators"));
            }
        }
    }
    if let Some(template) = config.get_string("export", "template") {
        if template.trim().is_empty() {
            return Err(invalid("export", "template", "template path must not be empty"));
        }
    }
    if let Some(ext) = config.get_string("export", "extension") {
        let ext = ext.trim().trim_start_matches('.');
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid(
                "export",
                "extension",
                "extension must be alphanumeric, e.g. jpg",
            ));
        }
    }
    Ok(())
}
