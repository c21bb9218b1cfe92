//! Selection state: option choices per category plus the trade setup record.

use crate::domain::category::Qualifier;
use crate::domain::error::TradecheckError;
use crate::domain::registry::CategoryRegistry;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One user-made selection within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    pub id: Uuid,
    pub category: String,
    pub code: String,
    pub qualifier: Option<Qualifier>,
}

impl OptionChoice {
    pub fn new(category: &str, code: &str, qualifier: Option<Qualifier>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.to_string(),
            code: code.to_string(),
            qualifier,
        }
    }

    pub fn matches(&self, code: &str, qualifier: Option<Qualifier>) -> bool {
        self.code == code && self.qualifier == qualifier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateKind {
    Today,
    Yesterday,
    Custom,
}

impl FromStr for DateKind {
    type Err = TradecheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(DateKind::Today),
            "yesterday" => Ok(DateKind::Yesterday),
            "custom" => Ok(DateKind::Custom),
            other => Err(TradecheckError::InvalidSetup {
                field: "date".into(),
                reason: format!("unknown date kind {other:?}"),
            }),
        }
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, TradecheckError> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(TradecheckError::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| TradecheckError::InvalidDate {
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    #[serde(alias = "type")]
    pub kind: DateKind,
    pub value: NaiveDate,
}

impl DateSelection {
    pub fn today(today: NaiveDate) -> Self {
        Self {
            kind: DateKind::Today,
            value: today,
        }
    }

    /// Date for a date-kind button. `Custom` keeps the current value.
    pub fn for_kind(kind: DateKind, today: NaiveDate, current: NaiveDate) -> Self {
        let value = match kind {
            DateKind::Today => today,
            DateKind::Yesterday => today - Duration::days(1),
            DateKind::Custom => current,
        };
        Self { kind, value }
    }

    /// Classify a typed date as today, yesterday or custom.
    pub fn from_input(value: &str, today: NaiveDate) -> Result<Self, TradecheckError> {
        let date = parse_calendar_date(value)?;
        let kind = if date == today {
            DateKind::Today
        } else if date == today - Duration::days(1) {
            DateKind::Yesterday
        } else {
            DateKind::Custom
        };
        Ok(Self { kind, value: date })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn code(self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Buy => "Buy",
            Direction::Sell => "Sell",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = TradecheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Direction::Buy),
            "sell" => Ok(Direction::Sell),
            other => Err(TradecheckError::InvalidSetup {
                field: "direction".into(),
                reason: format!("expected buy or sell, got {other:?}"),
            }),
        }
    }
}

/// Trade setup: exactly one date, instrument and direction at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub date: DateSelection,
    #[serde(alias = "pair")]
    pub instrument: String,
    pub direction: Direction,
}

impl Setup {
    pub fn new(today: NaiveDate, instrument: &str, direction: Direction) -> Self {
        Self {
            date: DateSelection::today(today),
            instrument: instrument.to_string(),
            direction,
        }
    }

    pub fn validate(&self) -> Result<(), TradecheckError> {
        if self.instrument.trim().is_empty() {
            return Err(TradecheckError::InvalidSetup {
                field: "instrument".into(),
                reason: "instrument must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// One setup field update. Dates arrive unparsed and are validated on apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupField {
    Date { kind: DateKind, value: String },
    Instrument(String),
    Direction(Direction),
}

impl SetupField {
    pub fn name(&self) -> &'static str {
        match self {
            SetupField::Date { .. } => "date",
            SetupField::Instrument(_) => "instrument",
            SetupField::Direction(_) => "direction",
        }
    }
}

/// Choices for every registered category plus the setup record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub setup: Setup,
    choices: BTreeMap<String, Vec<OptionChoice>>,
}

impl SelectionState {
    pub fn new(registry: &CategoryRegistry, setup: Setup) -> Self {
        let choices = registry
            .iter()
            .map(|cat| (cat.key.to_string(), Vec::new()))
            .collect();
        Self { setup, choices }
    }

    /// Choices in insertion order; empty for unknown keys.
    pub fn choices(&self, key: &str) -> &[OptionChoice] {
        self.choices.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn choices_mut(&mut self, key: &str) -> &mut Vec<OptionChoice> {
        self.choices.entry(key.to_string()).or_default()
    }

    pub fn is_empty(&self, key: &str) -> bool {
        self.choices(key).is_empty()
    }

    /// Total number of choices across all categories.
    pub fn selection_count(&self) -> usize {
        self.choices.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Timeframe;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_calendar_date_accepts_valid() {
        assert_eq!(parse_calendar_date("2024-02-29").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn parse_calendar_date_rejects_invalid() {
        for bad in ["2024-13-01", "2023-02-29", "2024-1-05", "20240105", "", "yesterday"] {
            assert!(
                matches!(parse_calendar_date(bad), Err(TradecheckError::InvalidDate { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn for_kind_resolves_button_dates() {
        let today = date(2024, 3, 1);
        let current = date(2023, 12, 25);
        assert_eq!(DateSelection::for_kind(DateKind::Today, today, current).value, today);
        assert_eq!(
            DateSelection::for_kind(DateKind::Yesterday, today, current).value,
            date(2024, 2, 29)
        );
        assert_eq!(DateSelection::for_kind(DateKind::Custom, today, current).value, current);
    }

    #[test]
    fn from_input_classifies_kind() {
        let today = date(2024, 3, 1);
        assert_eq!(
            DateSelection::from_input("2024-03-01", today).unwrap().kind,
            DateKind::Today
        );
        assert_eq!(
            DateSelection::from_input("2024-02-29", today).unwrap().kind,
            DateKind::Yesterday
        );
        assert_eq!(
            DateSelection::from_input("2024-01-15", today).unwrap().kind,
            DateKind::Custom
        );
        assert!(DateSelection::from_input("2024-02-30", today).is_err());
    }

    #[test]
    fn direction_parses() {
        assert_eq!("BUY".parse::<Direction>().unwrap(), Direction::Buy);
        assert_eq!("sell".parse::<Direction>().unwrap(), Direction::Sell);
        assert!("hold".parse::<Direction>().is_err());
    }

    #[test]
    fn setup_serializes_to_storage_shape() {
        let setup = Setup::new(date(2024, 5, 6), "XAUUSD", Direction::Sell);
        let json = serde_json::to_value(&setup).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": {"kind": "today", "value": "2024-05-06"},
                "instrument": "XAUUSD",
                "direction": "sell"
            })
        );
    }

    #[test]
    fn setup_accepts_legacy_field_names() {
        let json = r#"{"date":{"type":"custom","value":"2024-01-02"},"pair":"EURUSD","direction":"buy"}"#;
        let setup: Setup = serde_json::from_str(json).unwrap();
        assert_eq!(setup.instrument, "EURUSD");
        assert_eq!(setup.date.kind, DateKind::Custom);
        assert_eq!(setup.date.value, date(2024, 1, 2));
    }

    #[test]
    fn setup_validate_rejects_blank_instrument() {
        let setup = Setup::new(date(2024, 5, 6), "  ", Direction::Buy);
        assert!(setup.validate().is_err());
    }

    #[test]
    fn state_starts_with_every_category_empty() {
        let registry = CategoryRegistry::standard();
        let state = SelectionState::new(&registry, Setup::new(date(2024, 1, 1), "XAUUSD", Direction::Buy));
        for cat in registry.iter() {
            assert!(state.is_empty(cat.key));
        }
        assert_eq!(state.selection_count(), 0);
        assert!(state.choices("no.such").is_empty());
    }

    #[test]
    fn option_choice_matches_on_code_and_qualifier() {
        let q = Some(Qualifier::Timeframe(Timeframe::H4));
        let choice = OptionChoice::new("yesterday.fvg", "bullish", q);
        assert!(choice.matches("bullish", q));
        assert!(!choice.matches("bullish", Some(Qualifier::Timeframe(Timeframe::M15))));
        assert!(!choice.matches("bearish", q));
    }
}
