//! Image export: filenames, status messages, and the rasterizer hand-off.
//!
//! Export never touches selection state. A failed export only changes the
//! status and can be retried.

use crate::domain::error::TradecheckError;
use crate::domain::selection::Setup;
use crate::domain::settings::ExportSettings;
use crate::ports::export_port::{ExportPort, RenderRegion};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// Every panel plus notes.
    Dashboard,
    /// The consolidated summary report, notes hidden.
    Summary,
}

impl ExportKind {
    pub fn processing_message(self) -> &'static str {
        match self {
            ExportKind::Dashboard => "Capturing dashboard...",
            ExportKind::Summary => "Preparing summary report...",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            ExportKind::Dashboard => "Dashboard exported successfully!",
            ExportKind::Summary => "Summary report exported successfully!",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            ExportKind::Dashboard => "Error exporting dashboard. Please try again.",
            ExportKind::Summary => "Error exporting summary report. Please try again.",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            ExportKind::Dashboard => "#f5f6fa",
            ExportKind::Summary => "#ffffff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportStatus {
    #[default]
    Idle,
    Processing { kind: ExportKind },
    Success { kind: ExportKind, filename: String },
    Failed { kind: ExportKind, reason: String },
}

impl ExportStatus {
    /// Text for the status indicator.
    pub fn message(&self) -> &'static str {
        match self {
            ExportStatus::Idle => "",
            ExportStatus::Processing { kind } => kind.processing_message(),
            ExportStatus::Success { kind, .. } => kind.success_message(),
            ExportStatus::Failed { kind, .. } => kind.failure_message(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ExportStatus::Idle => "",
            ExportStatus::Processing { .. } => "processing",
            ExportStatus::Success { .. } => "success",
            ExportStatus::Failed { .. } => "error",
        }
    }
}

/// `YYYY-MM-DD-HH-MM-SS`, safe for file names.
pub fn timestamp_slug(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%d-%H-%M-%S").to_string()
}

/// Letters, digits, `-` and `_` pass through; anything else becomes `_`.
pub fn filename_part(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Suggested download name. Dashboard exports append the Ytd Day code when
/// one is selected.
pub fn suggested_filename(
    kind: ExportKind,
    settings: &ExportSettings,
    setup: &Setup,
    day_code: Option<&str>,
    now: NaiveDateTime,
) -> String {
    let prefix = match kind {
        ExportKind::Dashboard => &settings.dashboard_prefix,
        ExportKind::Summary => &settings.summary_prefix,
    };
    let mut name = format!(
        "{}-{}-{}-{}",
        prefix,
        filename_part(&setup.instrument),
        setup.direction.label(),
        timestamp_slug(now)
    );
    if kind == ExportKind::Dashboard {
        if let Some(code) = day_code {
            name.push('-');
            name.push_str(&filename_part(code));
        }
    }
    format!("{}.{}", name, settings.extension)
}

/// An encoded image ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Hand a region to the rasterizer. Empty output counts as a failure.
pub fn rasterize(
    port: &dyn ExportPort,
    region: &RenderRegion,
    filename: String,
) -> Result<ExportArtifact, TradecheckError> {
    let bytes = port.rasterize(region)?;
    if bytes.is_empty() {
        return Err(TradecheckError::ExportFailure {
            reason: "rasterizer returned an empty image".into(),
        });
    }
    Ok(ExportArtifact { filename, bytes })
}
