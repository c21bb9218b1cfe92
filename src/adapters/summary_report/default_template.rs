//! Built-in report markup with `{{PLACEHOLDER}}` substitution.
//!
//! Markup only carries structure and class names; presentation belongs to
//! the rendering collaborator.

use crate::domain::error::TradecheckError;
use std::fs;
use std::path::Path;

pub const PLACEHOLDERS: [&str; 5] = [
    "{{TITLE}}",
    "{{SETUP_INFO}}",
    "{{SECTIONS}}",
    "{{NOTES}}",
    "{{GENERATED_AT}}",
];

pub const DEFAULT_TEMPLATE: &str = r#"<div class="export-summary-container">
  <header class="export-header">
    <h1>{{TITLE}}</h1>
    <div class="setup-info">
{{SETUP_INFO}}
    </div>
  </header>
  <div class="complete-summary-panel">
{{SECTIONS}}
{{NOTES}}
  </div>
  <footer class="export-footer">Generated on: {{GENERATED_AT}}</footer>
</div>
"#;

/// Read a custom template, requiring at least the sections placeholder.
pub fn load_template(path: &Path) -> Result<String, TradecheckError> {
    let template = fs::read_to_string(path)?;
    if !template.contains("{{SECTIONS}}") {
        return Err(TradecheckError::ExportFailure {
            reason: format!("template {} has no {{{{SECTIONS}}}} placeholder", path.display()),
        });
    }
    Ok(template)
}
