//! Markup fragments for the summary report.

use crate::domain::projector::{ReportEntry, StyleHint};
use crate::domain::selection::Setup;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn value_class(style: StyleHint) -> String {
    match style {
        StyleHint::Neutral => "summary-value".to_string(),
        other => format!("summary-value {}", other.css_class()),
    }
}

pub fn render_setup_info(setup: &Setup) -> String {
    let direction_class = match setup.direction.code() {
        "buy" => "bullish-text",
        _ => "bearish-text",
    };
    format!(
        "      <span class=\"setup-pair\">Pair: {}</span>\n      <span class=\"setup-direction {}\">Direction: {}</span>\n      <span class=\"setup-date\">Date: {}</span>",
        escape(&setup.instrument),
        direction_class,
        setup.direction.label(),
        setup.date.value.format("%Y-%m-%d"),
    )
}

/// Entries grouped under their section label, keeping first-seen order.
pub fn group_sections(entries: &[ReportEntry]) -> Vec<(&'static str, Vec<&ReportEntry>)> {
    let mut sections: Vec<(&'static str, Vec<&ReportEntry>)> = Vec::new();
    for entry in entries {
        match sections.iter_mut().find(|(label, _)| *label == entry.section) {
            Some((_, rows)) => rows.push(entry),
            None => sections.push((entry.section, vec![entry])),
        }
    }
    sections
}

pub fn render_sections(entries: &[ReportEntry]) -> String {
    let mut output = String::new();
    for (section, rows) in group_sections(entries) {
        output.push_str("    <section class=\"complete-summary-section\">\n");
        output.push_str(&format!("      <h3>{}</h3>\n", escape(section)));
        for row in rows {
            output.push_str(&format!(
                "      <div class=\"summary-item\"><span class=\"summary-label\">{}</span><span class=\"{}\">{}</span></div>\n",
                escape(row.label),
                value_class(row.summary.style),
                escape(&row.summary.text),
            ));
        }
        output.push_str("    </section>\n");
    }
    output
}

pub fn render_notes(notes: Option<&str>) -> String {
    match notes {
        Some(text) if !text.trim().is_empty() => format!(
            "    <section class=\"summary-notes\">\n      <h3>Notes</h3>\n      <p>{}</p>\n    </section>",
            escape(text).replace('\n', "<br>")
        ),
        _ => String::new(),
    }
}
