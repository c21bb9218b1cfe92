//! Summary report markup for image export.
//!
//! Resolves the `{{PLACEHOLDER}}` markers of a template (the built-in default
//! or a custom file) from the projected report, producing the region handed
//! to the rasterizer.

pub mod default_template;
pub mod tables;

use chrono::NaiveDateTime;

use crate::domain::export::ExportKind;
use crate::domain::projector::ReportEntry;
use crate::domain::selection::Setup;
use crate::ports::export_port::RenderRegion;

/// Context for resolving template placeholders.
pub struct ReportContext<'a> {
    pub kind: ExportKind,
    pub setup: &'a Setup,
    pub entries: &'a [ReportEntry],
    /// Only rendered for dashboard exports.
    pub notes: Option<&'a str>,
    pub generated_at: NaiveDateTime,
}

pub fn title(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Dashboard => "Trading Analysis Dashboard",
        ExportKind::Summary => "Trading Analysis Summary Report",
    }
}

/// Resolve all placeholders in `template`.
pub fn resolve(template: &str, ctx: &ReportContext) -> String {
    let notes = match ctx.kind {
        ExportKind::Dashboard => tables::render_notes(ctx.notes),
        ExportKind::Summary => String::new(),
    };
    template
        .replace("{{TITLE}}", title(ctx.kind))
        .replace("{{SETUP_INFO}}", &tables::render_setup_info(ctx.setup))
        .replace("{{SECTIONS}}", &tables::render_sections(ctx.entries))
        .replace("{{NOTES}}", &notes)
        .replace(
            "{{GENERATED_AT}}",
            &ctx.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
}

/// Region for the rasterizer.
pub fn build_region(template: &str, ctx: &ReportContext) -> RenderRegion {
    RenderRegion {
        markup: resolve(template, ctx),
        background: ctx.kind.background(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::summary_report::default_template::DEFAULT_TEMPLATE;
    use crate::domain::projector::SummaryProjector;
    use crate::domain::registry::CategoryRegistry;
    use crate::domain::selection::Direction;
    use crate::domain::store::SelectionStore;
    use chrono::NaiveDate;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 3)
            .unwrap()
    }

    fn store() -> SelectionStore {
        let setup = Setup::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), "XAUUSD", Direction::Buy);
        let mut store = SelectionStore::new(CategoryRegistry::standard(), setup);
        store.apply_selection("today.gap", "gap-up", None).unwrap();
        store
    }

    fn entries(store: &SelectionStore) -> Vec<ReportEntry> {
        SummaryProjector::new(store.registry(), store.state()).project_full_report()
    }

    #[test]
    fn summary_export_resolves_every_placeholder() {
        let store = store();
        let entries = entries(&store);
        let ctx = ReportContext {
            kind: ExportKind::Summary,
            setup: &store.state().setup,
            entries: &entries,
            notes: Some("hidden from the summary"),
            generated_at: generated_at(),
        };
        let region = build_region(DEFAULT_TEMPLATE, &ctx);
        assert!(!region.markup.contains("{{"));
        assert!(region.markup.contains("<h1>Trading Analysis Summary Report</h1>"));
        assert!(region.markup.contains("Generated on: 2024-03-05 09:07:03"));
        assert!(region.markup.contains("Gap Up"));
        assert!(!region.markup.contains("hidden from the summary"));
        assert_eq!(region.background, "#ffffff");
    }

    #[test]
    fn dashboard_export_includes_notes() {
        let store = store();
        let entries = entries(&store);
        let ctx = ReportContext {
            kind: ExportKind::Dashboard,
            setup: &store.state().setup,
            entries: &entries,
            notes: Some("London sweep first"),
            generated_at: generated_at(),
        };
        let region = build_region(DEFAULT_TEMPLATE, &ctx);
        assert!(region.markup.contains("Trading Analysis Dashboard"));
        assert!(region.markup.contains("London sweep first"));
        assert_eq!(region.background, "#f5f6fa");
    }

    #[test]
    fn custom_template_is_resolved() {
        let store = store();
        let entries = entries(&store);
        let ctx = ReportContext {
            kind: ExportKind::Summary,
            setup: &store.state().setup,
            entries: &entries,
            notes: None,
            generated_at: generated_at(),
        };
        let region = build_region("<p>{{TITLE}}</p>", &ctx);
        assert_eq!(region.markup, "<p>Trading Analysis Summary Report</p>");
    }
}
