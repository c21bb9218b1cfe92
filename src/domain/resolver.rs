//! Cross-reference resolution for option highlighting.
//!
//! An entry option carries a comma-separated list of reference tokens
//! (`"gap-up,asia-high"`). It is highlighted when any token is satisfied by
//! a choice in one of the watched source categories.

use crate::domain::registry::CategoryRegistry;
use crate::domain::selection::SelectionState;
use std::collections::{BTreeMap, BTreeSet};

/// Source categories whose choices can satisfy a reference.
pub const WATCHED_CATEGORIES: [&str; 3] = ["today.session", "yesterday.pd", "today.gap"];

/// Pure view over one state snapshot.
pub struct CrossReferenceResolver<'a> {
    registry: &'a CategoryRegistry,
    state: &'a SelectionState,
}

impl<'a> CrossReferenceResolver<'a> {
    pub fn new(registry: &'a CategoryRegistry, state: &'a SelectionState) -> Self {
        Self { registry, state }
    }

    /// Whether any watched choice matches `reference` under its category's
    /// token rule.
    pub fn is_satisfied(&self, reference: &str) -> bool {
        let reference = reference.trim();
        if reference.is_empty() {
            return false;
        }
        WATCHED_CATEGORIES.iter().any(|key| {
            let Ok(cat) = self.registry.get(key) else {
                return false;
            };
            self.state
                .choices(key)
                .iter()
                .any(|choice| cat.token(&choice.code, choice.qualifier) == reference)
        })
    }

    /// Whether any of the comma-separated references is satisfied.
    pub fn any_satisfied(&self, refs: &str) -> bool {
        refs.split(',').any(|r| self.is_satisfied(r))
    }

    /// Option identifiers whose reference lists are satisfied.
    pub fn resolve_highlights<K, V>(&self, entry_refs: &BTreeMap<K, V>) -> BTreeSet<K>
    where
        K: Ord + Clone,
        V: AsRef<str>,
    {
        entry_refs
            .iter()
            .filter(|(_, refs)| self.any_satisfied(refs.as_ref()))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Reference lists declared by the registry, keyed `category:code`.
    pub fn declared_refs(&self) -> BTreeMap<String, &'static str> {
        self.registry
            .iter()
            .flat_map(|cat| {
                cat.refs
                    .iter()
                    .map(move |(code, refs)| (format!("{}:{}", cat.key, code), *refs))
            })
            .collect()
    }

    /// Highlight set for every option that declares references.
    pub fn declared_highlights(&self) -> BTreeSet<String> {
        self.resolve_highlights(&self.declared_refs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::{Direction, Setup};
    use crate::domain::store::SelectionStore;
    use chrono::NaiveDate;

    fn store() -> SelectionStore {
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        SelectionStore::new(
            CategoryRegistry::standard(),
            Setup::new(today, "XAUUSD", Direction::Buy),
        )
    }

    #[test]
    fn nothing_satisfied_on_empty_state() {
        let s = store();
        let resolver = CrossReferenceResolver::new(s.registry(), s.state());
        assert!(!resolver.is_satisfied("gap-up"));
        assert!(!resolver.is_satisfied(""));
    }

    #[test]
    fn session_and_gap_match_by_code() {
        let mut s = store();
        s.apply_selection("today.session", "asia-high", None).unwrap();
        s.apply_selection("today.gap", "gap-down", None).unwrap();
        let resolver = CrossReferenceResolver::new(s.registry(), s.state());
        assert!(resolver.is_satisfied("asia-high"));
        assert!(resolver.is_satisfied("gap-down"));
        assert!(!resolver.is_satisfied("gap-up"));
    }

    #[test]
    fn price_level_matches_composed_token() {
        let mut s = store();
        s.apply_selection("yesterday.pd", "sweep", Some("pdl")).unwrap();
        let resolver = CrossReferenceResolver::new(s.registry(), s.state());
        assert!(resolver.is_satisfied("sweep-pdl"));
        assert!(!resolver.is_satisfied("sweep"));
        assert!(!resolver.is_satisfied("sweep-pdh"));
    }

    #[test]
    fn unwatched_categories_never_satisfy() {
        let mut s = store();
        s.apply_selection("today.rn", "break-rn-up", None).unwrap();
        s.apply_selection("tpSelection.pd", "break", Some("pdh")).unwrap();
        let resolver = CrossReferenceResolver::new(s.registry(), s.state());
        assert!(!resolver.is_satisfied("break-rn-up"));
        assert!(!resolver.is_satisfied("break-pdh"));
    }

    #[test]
    fn highlight_uses_or_semantics() {
        let mut s = store();
        s.apply_selection("today.gap", "gap-up", None).unwrap();
        let resolver = CrossReferenceResolver::new(s.registry(), s.state());
        let mut refs = BTreeMap::new();
        refs.insert("opt-a", "gap-up,asia-high");
        refs.insert("opt-b", "asia-low, gap-down");
        let highlighted = resolver.resolve_highlights(&refs);
        assert_eq!(highlighted.into_iter().collect::<Vec<_>>(), vec!["opt-a"]);
    }

    #[test]
    fn whitespace_around_refs_is_ignored() {
        let mut s = store();
        s.apply_selection("today.session", "asia-low", None).unwrap();
        let resolver = CrossReferenceResolver::new(s.registry(), s.state());
        assert!(resolver.any_satisfied("gap-up, asia-low "));
    }

    #[test]
    fn declared_highlights_follow_registry_refs() {
        let mut s = store();
        s.apply_selection("yesterday.pd", "break", Some("pdh")).unwrap();
        let resolver = CrossReferenceResolver::new(s.registry(), s.state());
        let highlighted = resolver.declared_highlights();
        assert!(highlighted.contains("entry.breakGo:break-pdh"));
        assert!(highlighted.contains("entry.breakMitiGo:break-miti-pdh"));
        assert!(!highlighted.contains("entry.breakGo:break-pdl"));
    }
}
