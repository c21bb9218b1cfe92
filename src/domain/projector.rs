//! Summary projection: display text and style hints derived from state.
//!
//! Projections are recomputed from [`SelectionState`] on demand and never
//! feed back into it.

use crate::domain::category::OptionSet;
use crate::domain::error::TradecheckError;
use crate::domain::registry::CategoryRegistry;
use crate::domain::selection::{DateKind, Direction, SelectionState, Setup};
use uuid::Uuid;

pub const SETUP_SECTION: &str = "Trade Setup";
pub const EMPTY_TEXT: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleHint {
    Empty,
    Bullish,
    Bearish,
    Break,
    Sweep,
    Fill,
    NoGap,
    Neutral,
}

impl StyleHint {
    pub fn css_class(self) -> &'static str {
        match self {
            StyleHint::Empty => "empty",
            StyleHint::Bullish => "bullish",
            StyleHint::Bearish => "bearish",
            StyleHint::Break => "break",
            StyleHint::Sweep => "sweep",
            StyleHint::Fill => "fill",
            StyleHint::NoGap => "no-gap",
            StyleHint::Neutral => "neutral",
        }
    }
}

/// Classify an option token. First matching rule wins.
pub fn classify(token: &str) -> StyleHint {
    if token.contains("bull") || token == "gap-up" || token.contains("up") {
        StyleHint::Bullish
    } else if token.contains("bear") || token == "gap-down" || token.contains("down") {
        StyleHint::Bearish
    } else if token.contains("break") {
        StyleHint::Break
    } else if token.contains("sweep") {
        StyleHint::Sweep
    } else if token.contains("fill") {
        StyleHint::Fill
    } else if token == "no-gap" {
        StyleHint::NoGap
    } else {
        StyleHint::Neutral
    }
}

/// One choice rendered as an independent chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub id: Uuid,
    pub text: String,
    pub style: StyleHint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub text: String,
    pub style: StyleHint,
    pub chips: Vec<Chip>,
}

impl CategorySummary {
    pub fn empty() -> Self {
        Self {
            text: EMPTY_TEXT.to_string(),
            style: StyleHint::Empty,
            chips: Vec::new(),
        }
    }

    fn plain(text: String, style: StyleHint) -> Self {
        Self {
            text,
            style,
            chips: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.style == StyleHint::Empty
    }
}

/// One labelled row of the consolidated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub section: &'static str,
    pub label: &'static str,
    /// Category key; `None` for setup rows.
    pub key: Option<&'static str>,
    pub summary: CategorySummary,
}

/// Display form of the setup date.
pub fn date_display(setup: &Setup) -> String {
    match setup.date.kind {
        DateKind::Today => "Today".to_string(),
        DateKind::Yesterday => "Yesterday".to_string(),
        DateKind::Custom => setup.date.value.format("%A, %B %-d, %Y").to_string(),
    }
}

pub fn direction_style(direction: Direction) -> StyleHint {
    match direction {
        Direction::Buy => StyleHint::Bullish,
        Direction::Sell => StyleHint::Bearish,
    }
}

pub struct SummaryProjector<'a> {
    registry: &'a CategoryRegistry,
    state: &'a SelectionState,
}

impl<'a> SummaryProjector<'a> {
    pub fn new(registry: &'a CategoryRegistry, state: &'a SelectionState) -> Self {
        Self { registry, state }
    }

    pub fn project_category_summary(&self, key: &str) -> Result<CategorySummary, TradecheckError> {
        let cat = self.registry.get(key)?;
        let choices = self.state.choices(cat.key);
        if choices.is_empty() {
            return Ok(CategorySummary::empty());
        }

        let chips: Vec<Chip> = choices
            .iter()
            .map(|choice| Chip {
                id: choice.id,
                text: cat.format(&choice.code, choice.qualifier),
                style: match cat.options {
                    OptionSet::Open => StyleHint::Neutral,
                    OptionSet::Closed(_) => classify(&cat.token(&choice.code, choice.qualifier)),
                },
            })
            .collect();

        let (text, style) = if let [only] = chips.as_slice() {
            (only.text.clone(), only.style)
        } else {
            let joined = chips
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            (joined, StyleHint::Neutral)
        };

        Ok(CategorySummary { text, style, chips })
    }

    pub fn project_setup(&self) -> Vec<ReportEntry> {
        let setup = &self.state.setup;
        let row = |label, summary| ReportEntry {
            section: SETUP_SECTION,
            label,
            key: None,
            summary,
        };
        vec![
            row(
                "Date",
                CategorySummary::plain(date_display(setup), StyleHint::Neutral),
            ),
            row(
                "Pair",
                CategorySummary::plain(setup.instrument.clone(), StyleHint::Neutral),
            ),
            row(
                "Direction",
                CategorySummary::plain(
                    setup.direction.label().to_string(),
                    direction_style(setup.direction),
                ),
            ),
        ]
    }

    /// Setup rows followed by every category in registry order.
    pub fn project_full_report(&self) -> Vec<ReportEntry> {
        let mut entries = self.project_setup();
        for cat in self.registry.iter() {
            let summary = self
                .project_category_summary(cat.key)
                .unwrap_or_else(|_| CategorySummary::empty());
            entries.push(ReportEntry {
                section: cat.panel.label(),
                label: cat.label,
                key: Some(cat.key),
                summary,
            });
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::SetupField;
    use crate::domain::store::SelectionStore;
    use chrono::NaiveDate;

    fn store() -> SelectionStore {
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        SelectionStore::new(
            CategoryRegistry::standard(),
            Setup::new(today, "XAUUSD", Direction::Buy),
        )
    }

    fn summary(s: &SelectionStore, key: &str) -> CategorySummary {
        SummaryProjector::new(s.registry(), s.state())
            .project_category_summary(key)
            .unwrap()
    }

    #[test]
    fn classify_follows_rule_order() {
        assert_eq!(classify("bull-day"), StyleHint::Bullish);
        assert_eq!(classify("gap-up"), StyleHint::Bullish);
        assert_eq!(classify("break-rn-up"), StyleHint::Bullish);
        assert_eq!(classify("bear-to-bull-bos"), StyleHint::Bullish);
        assert_eq!(classify("gap-down"), StyleHint::Bearish);
        assert_eq!(classify("sweep-bear-low-m5"), StyleHint::Bearish);
        assert_eq!(classify("break-pdh"), StyleHint::Break);
        assert_eq!(classify("sweep-asia-low"), StyleHint::Sweep);
        assert_eq!(classify("fill"), StyleHint::Fill);
        assert_eq!(classify("no-gap"), StyleHint::NoGap);
        assert_eq!(classify("1-4"), StyleHint::Neutral);
    }

    #[test]
    fn empty_category_is_none() {
        let s = store();
        for cat in s.registry().iter() {
            assert_eq!(summary(&s, cat.key), CategorySummary::empty());
        }
    }

    #[test]
    fn single_choice_uses_formatter_and_style() {
        let mut s = store();
        s.apply_selection("yesterday.day", "bull-day", None).unwrap();
        let sum = summary(&s, "yesterday.day");
        assert_eq!(sum.text, "Bull Day");
        assert_eq!(sum.style, StyleHint::Bullish);
        assert_eq!(sum.chips.len(), 1);
    }

    #[test]
    fn price_level_single_choice_styles_as_break() {
        let mut s = store();
        s.apply_selection("yesterday.pd", "break", Some("pdl")).unwrap();
        let sum = summary(&s, "yesterday.pd");
        assert_eq!(sum.text, "Break PDL");
        assert_eq!(sum.style, StyleHint::Break);
    }

    #[test]
    fn multiple_choices_join_with_neutral_style() {
        let mut s = store();
        s.apply_selection("yesterday.fvg", "bullish", Some("h4")).unwrap();
        s.apply_selection("yesterday.fvg", "bullish", Some("m15")).unwrap();
        let sum = summary(&s, "yesterday.fvg");
        assert_eq!(sum.text, "H4 Bullish, M15 Bullish");
        assert_eq!(sum.style, StyleHint::Neutral);
        let chip_texts: Vec<_> = sum.chips.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(chip_texts, vec!["H4 Bullish", "M15 Bullish"]);
        assert!(sum.chips.iter().all(|c| c.style == StyleHint::Bullish));
    }

    #[test]
    fn unknown_category_fails() {
        let s = store();
        let projector = SummaryProjector::new(s.registry(), s.state());
        assert!(projector.project_category_summary("nope").is_err());
    }

    #[test]
    fn date_display_forms() {
        let mut s = store();
        assert_eq!(date_display(&s.state().setup), "Today");
        s.set_setup_field(SetupField::Date {
            kind: DateKind::Custom,
            value: "2024-01-01".into(),
        })
        .unwrap();
        assert_eq!(date_display(&s.state().setup), "Monday, January 1, 2024");
        s.set_setup_field(SetupField::Date {
            kind: DateKind::Yesterday,
            value: "2024-06-02".into(),
        })
        .unwrap();
        assert_eq!(date_display(&s.state().setup), "Yesterday");
    }

    #[test]
    fn full_report_covers_setup_and_categories_in_order() {
        let mut s = store();
        s.set_setup_field(SetupField::Direction(Direction::Sell)).unwrap();
        s.apply_selection("today.gap", "no-gap", None).unwrap();
        let report = SummaryProjector::new(s.registry(), s.state()).project_full_report();

        assert_eq!(report.len(), 3 + s.registry().len());
        assert_eq!(report[0].section, SETUP_SECTION);
        assert_eq!(report[1].summary.text, "XAUUSD");
        assert_eq!(report[2].summary.text, "Sell");
        assert_eq!(report[2].summary.style, StyleHint::Bearish);
        assert_eq!(report[3].key, Some("yesterday.day"));
        assert_eq!(report[3].section, "Yesterday Analysis");

        let gap = report.iter().find(|e| e.key == Some("today.gap")).unwrap();
        assert_eq!(gap.summary.text, "No Gap");
        assert_eq!(gap.summary.style, StyleHint::NoGap);
        assert_eq!(report.last().unwrap().key, Some("tpSelection.oldStructure"));
    }

    #[test]
    fn free_text_choices_are_neutral() {
        let mut s = store();
        s.apply_selection("entry.sweep", "sweep up", None).unwrap();
        let one = summary(&s, "entry.sweep");
        assert_eq!(one.text, "sweep up");
        assert_eq!(one.style, StyleHint::Neutral);
        assert_eq!(one.chips[0].style, StyleHint::Neutral);

        s.apply_selection("entry.fill", "Bullish fill", None).unwrap();
        assert_eq!(summary(&s, "entry.fill").style, StyleHint::Neutral);
    }
}
