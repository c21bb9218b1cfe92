//! Category model: cardinality rules, qualifier dimensions, and option
//! display tables.
//!
//! A [`Category`] is one selectable dimension of the checklist. Categories
//! are declared statically in [`crate::domain::registry`]; nothing here
//! holds mutable state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// At most one choice; re-applying the active option clears it.
    Single,
    /// Any number of distinct (code, qualifier) pairs; re-applying toggles.
    Multi,
}

/// Checklist panel a category is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Panel {
    Yesterday,
    Today,
    Entry,
    EntrySelection,
    TpSelection,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Yesterday,
        Panel::Today,
        Panel::Entry,
        Panel::EntrySelection,
        Panel::TpSelection,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Panel::Yesterday => "Yesterday Analysis",
            Panel::Today => "Today Analysis",
            Panel::Entry => "Entry Strategy",
            Panel::EntrySelection => "Entry Selection",
            Panel::TpSelection => "Take Profit Selection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    D,
    H4,
    H1,
    M15,
    M5,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::D,
        Timeframe::H4,
        Timeframe::H1,
        Timeframe::M15,
        Timeframe::M5,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Timeframe::D => "d",
            Timeframe::H4 => "h4",
            Timeframe::H1 => "h1",
            Timeframe::M15 => "m15",
            Timeframe::M5 => "m5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::D => "D",
            Timeframe::H4 => "H4",
            Timeframe::H1 => "H1",
            Timeframe::M15 => "M15",
            Timeframe::M5 => "M5",
        }
    }
}

impl FromStr for Timeframe {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.code().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceLevel {
    Pdh,
    Pdl,
}

impl PriceLevel {
    pub const ALL: [PriceLevel; 2] = [PriceLevel::Pdh, PriceLevel::Pdl];

    pub fn code(self) -> &'static str {
        match self {
            PriceLevel::Pdh => "pdh",
            PriceLevel::Pdl => "pdl",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceLevel::Pdh => "PDH",
            PriceLevel::Pdl => "PDL",
        }
    }
}

impl FromStr for PriceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceLevel::ALL
            .into_iter()
            .find(|level| level.code().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// The dimension that qualifies an option within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierKind {
    Timeframe,
    PriceLevel,
}

impl QualifierKind {
    pub fn parse(self, raw: &str) -> Option<Qualifier> {
        match self {
            QualifierKind::Timeframe => raw.parse().ok().map(Qualifier::Timeframe),
            QualifierKind::PriceLevel => raw.parse().ok().map(Qualifier::PriceLevel),
        }
    }

    /// Qualifier active before the user picks one.
    pub fn default_qualifier(self) -> Qualifier {
        match self {
            QualifierKind::Timeframe => Qualifier::Timeframe(Timeframe::D),
            QualifierKind::PriceLevel => Qualifier::PriceLevel(PriceLevel::Pdh),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Qualifier {
    Timeframe(Timeframe),
    PriceLevel(PriceLevel),
}

impl Qualifier {
    pub fn kind(self) -> QualifierKind {
        match self {
            Qualifier::Timeframe(_) => QualifierKind::Timeframe,
            Qualifier::PriceLevel(_) => QualifierKind::PriceLevel,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Qualifier::Timeframe(tf) => tf.code(),
            Qualifier::PriceLevel(level) => level.code(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Qualifier::Timeframe(tf) => tf.label(),
            Qualifier::PriceLevel(level) => level.label(),
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The option codes a category accepts, paired with their display labels.
#[derive(Debug, Clone, Copy)]
pub enum OptionSet {
    Closed(&'static [(&'static str, &'static str)]),
    /// Any non-empty code; displayed verbatim.
    Open,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub key: &'static str,
    pub panel: Panel,
    pub label: &'static str,
    pub cardinality: Cardinality,
    pub qualifier: Option<QualifierKind>,
    pub options: OptionSet,
    /// Comma-separated cross-reference tokens per option code.
    pub refs: &'static [(&'static str, &'static str)],
}

impl Category {
    pub fn is_single(&self) -> bool {
        self.cardinality == Cardinality::Single
    }

    pub fn accepts(&self, code: &str) -> bool {
        match self.options {
            OptionSet::Closed(table) => table.iter().any(|(c, _)| *c == code),
            OptionSet::Open => !code.trim().is_empty(),
        }
    }

    pub fn option_label(&self, code: &str) -> Option<&'static str> {
        match self.options {
            OptionSet::Closed(table) => table.iter().find(|(c, _)| *c == code).map(|(_, l)| *l),
            OptionSet::Open => None,
        }
    }

    /// Option codes in declaration order; empty for open categories.
    pub fn option_codes(&self) -> Vec<&'static str> {
        match self.options {
            OptionSet::Closed(table) => table.iter().map(|(c, _)| *c).collect(),
            OptionSet::Open => Vec::new(),
        }
    }

    /// Display text for one choice. Unlabelled codes fall back to the code.
    pub fn format(&self, code: &str, qualifier: Option<Qualifier>) -> String {
        let label = self.option_label(code).unwrap_or(code);
        match qualifier {
            Some(q @ Qualifier::Timeframe(_)) => format!("{} {}", q.label(), label),
            Some(q @ Qualifier::PriceLevel(_)) => format!("{} {}", label, q.label()),
            None => label.to_string(),
        }
    }

    /// Token that cross-references and style classification match against.
    ///
    /// Price-level categories compose `action-level` (`break-pdh`); every
    /// other category matches on the bare code.
    pub fn token(&self, code: &str, qualifier: Option<Qualifier>) -> String {
        match qualifier {
            Some(q @ Qualifier::PriceLevel(_)) => format!("{}-{}", code, q.code()),
            _ => code.to_string(),
        }
    }

    pub fn refs_for(&self, code: &str) -> Option<&'static str> {
        self.refs.iter().find(|(c, _)| *c == code).map(|(_, r)| *r)
    }
}
