//! Category registry: the static table of every checklist category.
//!
//! Categories are listed in display order; [`CategoryRegistry::iter`] and
//! the full report preserve it.

use crate::domain::category::{Cardinality, Category, OptionSet, Panel, QualifierKind};
use crate::domain::error::TradecheckError;
use std::collections::HashMap;

const DAY: &[(&str, &str)] = &[
    ("bull-day", "Bull Day"),
    ("bear-day", "Bear Day"),
    ("ranging-bull-day", "Ranging but Bull"),
    ("ranging-bear-day", "Ranging but Bear"),
];

const FVG: &[(&str, &str)] = &[("bullish", "Bullish"), ("bearish", "Bearish")];

const PD: &[(&str, &str)] = &[("break", "Break"), ("sweep", "Sweep")];

const STRUCTURE_M15: &[(&str, &str)] = &[
    ("break-bull-high-m15", "Break Bull High"),
    ("sweep-bull-high-m15", "Sweep Bull High"),
    ("break-bull-low-m15", "Break Bull Low"),
    ("sweep-bull-low-m15", "Sweep Bull Low"),
    ("break-bear-high-m15", "Break Bear High"),
    ("sweep-bear-high-m15", "Sweep Bear High"),
    ("break-bear-low-m15", "Break Bear Low"),
    ("sweep-bear-low-m15", "Sweep Bear Low"),
];

const STRUCTURE_M5: &[(&str, &str)] = &[
    ("break-bull-high-m5", "Break Bull High"),
    ("sweep-bull-high-m5", "Sweep Bull High"),
    ("break-bull-low-m5", "Break Bull Low"),
    ("sweep-bull-low-m5", "Sweep Bull Low"),
    ("break-bear-high-m5", "Break Bear High"),
    ("sweep-bear-high-m5", "Sweep Bear High"),
    ("break-bear-low-m5", "Break Bear Low"),
    ("sweep-bear-low-m5", "Sweep Bear Low"),
];

const SESSION: &[(&str, &str)] = &[
    ("asia-high", "Asia High"),
    ("asia-low", "Asia Low"),
    ("break-asia-high", "Break Asia High"),
    ("break-asia-low", "Break Asia Low"),
    ("sweep-asia-high", "Sweep Asia High"),
    ("sweep-asia-low", "Sweep Asia Low"),
    ("entry-asia-session", "Entry in Asia Session"),
    ("asia-no-break-sweep", "Asia Not Yet Break/Sweep"),
];

const GAP: &[(&str, &str)] = &[
    ("gap-up", "Gap Up"),
    ("gap-down", "Gap Down"),
    ("no-gap", "No Gap"),
    ("fill-gap-up", "Fill Gap Up"),
    ("fill-gap-down", "Fill Gap Down"),
];

const ROUND_NUMBER: &[(&str, &str)] = &[
    ("break-rn-up", "Break RN Up"),
    ("break-rn-down", "Break RN Down"),
    ("sweep-rn-up", "Sweep RN Up"),
    ("sweep-rn-down", "Sweep RN Down"),
];

const BREAK_GO: &[(&str, &str)] = &[
    ("break-ah", "Break AH"),
    ("break-al", "Break AL"),
    ("break-pdh", "Break PDH"),
    ("break-pdl", "Break PDL"),
];

const BREAK_GO_REFS: &[(&str, &str)] = &[
    ("break-ah", "break-asia-high,asia-high"),
    ("break-al", "break-asia-low,asia-low"),
    ("break-pdh", "break-pdh,gap-up"),
    ("break-pdl", "break-pdl,gap-down"),
];

const BREAK_MITI_GO: &[(&str, &str)] = &[
    ("break-miti-ah", "Break and Miti AH"),
    ("break-miti-al", "Break and Miti AL"),
    ("break-miti-pdh", "Break and Miti PDH"),
    ("break-miti-pdl", "Break and Miti PDL"),
];

const BREAK_MITI_GO_REFS: &[(&str, &str)] = &[
    ("break-miti-ah", "break-asia-high,asia-high"),
    ("break-miti-al", "break-asia-low,asia-low"),
    ("break-miti-pdh", "break-pdh"),
    ("break-miti-pdl", "break-pdl"),
];

const DIRECT_ENTRY: &[(&str, &str)] = &[
    ("h4-de", "H4 DE"),
    ("h1-de", "H1 DE"),
    ("m15-de", "m15 DE"),
    ("m5-de", "m5 DE"),
    ("m5-in-m15-fvg", "m5 in m15 FVG"),
];

const CONFIRMATION_ENTRY: &[(&str, &str)] = &[
    ("h4-m15-m5", "H4 m15 m5"),
    ("h4-m15", "h4 m15"),
    ("h4-m5", "h4 m5"),
    ("h1-m15-m5", "H1 m15 m5"),
    ("h1-m15", "h1 m15"),
    ("h1-m5", "h1 m5"),
    ("m15-m5", "m15 m5"),
];

const M5_TYPE: &[(&str, &str)] = &[
    ("cover-whole", "Cover Whole"),
    ("cover-high", "Cover High"),
    ("cover-low", "Cover Low"),
    ("cover-previous", "Cover Previous"),
];

const BOS: &[(&str, &str)] = &[
    ("bull-to-bull-bos", "Bull to Bull BOS"),
    ("bear-to-bear-bos", "Bear to Bear BOS"),
    ("bull-to-bear-bos", "Bull to Bear BOS"),
    ("bear-to-bull-bos", "Bear to Bull BOS"),
];

const M5_AGE: &[(&str, &str)] = &[("new-m5", "New m5"), ("old-m5", "Old m5")];

const TP_SESSION: &[(&str, &str)] = &[
    ("to-asia-high", "To Asia High"),
    ("to-asia-low", "To Asia Low"),
];

const RISK_REWARD: &[(&str, &str)] = &[
    ("1-4", "1 : 4"),
    ("1-5", "1 : 5"),
    ("1-8", "1 : 8"),
    ("1-10", "1 : 10"),
];

const TP_ROUND_NUMBER: &[(&str, &str)] = &[("to-round-number", "To Round Number")];

const OPPOSITE_FVG: &[(&str, &str)] = &[
    ("new-opposite-m5-fvg", "New Opposite m5 FVG"),
    ("new-opposite-m15-fvg", "New Opposite m15 FVG"),
];

const OLD_STRUCTURE: &[(&str, &str)] = &[
    ("d-structure-high", "D Structure High"),
    ("d-structure-low", "D Structure Low"),
    ("h4-structure-high", "H4 Structure High"),
    ("h4-structure-low", "H4 Structure Low"),
];

const fn category(
    key: &'static str,
    panel: Panel,
    label: &'static str,
    cardinality: Cardinality,
    options: OptionSet,
) -> Category {
    Category {
        key,
        panel,
        label,
        cardinality,
        qualifier: None,
        options,
        refs: &[],
    }
}

const fn qualified(
    key: &'static str,
    panel: Panel,
    label: &'static str,
    kind: QualifierKind,
    options: &'static [(&'static str, &'static str)],
) -> Category {
    Category {
        key,
        panel,
        label,
        cardinality: Cardinality::Multi,
        qualifier: Some(kind),
        options: OptionSet::Closed(options),
        refs: &[],
    }
}

const fn with_refs(mut cat: Category, refs: &'static [(&'static str, &'static str)]) -> Category {
    cat.refs = refs;
    cat
}

use Cardinality::{Multi, Single};
use OptionSet::{Closed, Open};

/// Every checklist category, in display order.
pub const CATEGORIES: &[Category] = &[
    category("yesterday.day", Panel::Yesterday, "Ytd Day", Single, Closed(DAY)),
    qualified("yesterday.fvg", Panel::Yesterday, "FVG", QualifierKind::Timeframe, FVG),
    qualified("yesterday.pd", Panel::Yesterday, "PD", QualifierKind::PriceLevel, PD),
    category("yesterday.m15", Panel::Yesterday, "m15 Structure", Multi, Closed(STRUCTURE_M15)),
    category("yesterday.m5", Panel::Yesterday, "m5 Structure", Multi, Closed(STRUCTURE_M5)),
    qualified("today.fvg", Panel::Today, "FVG", QualifierKind::Timeframe, FVG),
    category("today.session", Panel::Today, "Session", Multi, Closed(SESSION)),
    category("today.gap", Panel::Today, "Gap", Multi, Closed(GAP)),
    category("today.rn", Panel::Today, "Round Number", Multi, Closed(ROUND_NUMBER)),
    category("today.m15", Panel::Today, "m15 Structure", Multi, Closed(STRUCTURE_M15)),
    category("today.m5", Panel::Today, "m5 Structure", Multi, Closed(STRUCTURE_M5)),
    with_refs(
        category("entry.breakGo", Panel::Entry, "Break and Go", Multi, Closed(BREAK_GO)),
        BREAK_GO_REFS,
    ),
    with_refs(
        category("entry.breakMitiGo", Panel::Entry, "Break Miti Go", Multi, Closed(BREAK_MITI_GO)),
        BREAK_MITI_GO_REFS,
    ),
    category("entry.sweep", Panel::Entry, "Sweep Type", Multi, Open),
    category("entry.fill", Panel::Entry, "Fill Type", Multi, Open),
    category("entrySelection.de", Panel::EntrySelection, "Direct Entry", Single, Closed(DIRECT_ENTRY)),
    category("entrySelection.ce", Panel::EntrySelection, "Confirmation Entry", Multi, Closed(CONFIRMATION_ENTRY)),
    category("entrySelection.m5Type", Panel::EntrySelection, "m5 Entry Type", Multi, Closed(M5_TYPE)),
    category("entrySelection.bos", Panel::EntrySelection, "BOS Type", Multi, Closed(BOS)),
    category("entrySelection.m5Age", Panel::EntrySelection, "m5 Age", Single, Closed(M5_AGE)),
    qualified("tpSelection.pd", Panel::TpSelection, "PD", QualifierKind::PriceLevel, PD),
    category("tpSelection.ses", Panel::TpSelection, "Ses", Multi, Closed(TP_SESSION)),
    category("tpSelection.rr", Panel::TpSelection, "RR", Multi, Closed(RISK_REWARD)),
    category("tpSelection.rn", Panel::TpSelection, "RN", Multi, Closed(TP_ROUND_NUMBER)),
    category("tpSelection.oppositeFvg", Panel::TpSelection, "Opposite FVG", Multi, Closed(OPPOSITE_FVG)),
    category("tpSelection.oldStructure", Panel::TpSelection, "Old Structure", Multi, Closed(OLD_STRUCTURE)),
];

/// Immutable lookup over a category table.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: &'static [Category],
    index: HashMap<&'static str, usize>,
}

impl CategoryRegistry {
    pub fn new(categories: &'static [Category]) -> Self {
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, cat)| (cat.key, i))
            .collect();
        Self { categories, index }
    }

    /// Registry over the built-in checklist table.
    pub fn standard() -> Self {
        Self::new(CATEGORIES)
    }

    pub fn get(&self, key: &str) -> Result<&'static Category, TradecheckError> {
        let categories = self.categories;
        self.index
            .get(key)
            .map(|&i| &categories[i])
            .ok_or_else(|| TradecheckError::UnknownCategory {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Category> + use<> {
        let categories: &'static [Category] = self.categories;
        categories.iter()
    }

    pub fn in_panel(&self, panel: Panel) -> impl Iterator<Item = &'static Category> + use<> {
        let categories: &'static [Category] = self.categories;
        categories.iter().filter(move |cat| cat.panel == panel)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
