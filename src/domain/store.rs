//! Selection store: owns the selection state and is the only place it is
//! mutated.
//!
//! Every operation either applies fully or returns an error with the state
//! untouched. Observers are notified after each mutation that changed the
//! state, with the affected category key (or setup field) so projections can
//! recompute incrementally.

use crate::domain::category::{Cardinality, Category, Qualifier};
use crate::domain::error::TradecheckError;
use crate::domain::registry::CategoryRegistry;
use crate::domain::selection::{
    parse_calendar_date, DateSelection, OptionChoice, SelectionState, Setup, SetupField,
};
use log::debug;
use std::collections::HashMap;
use uuid::Uuid;

/// What a mutation touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Category(String),
    Setup(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Change)>;

pub struct SelectionStore {
    registry: CategoryRegistry,
    state: SelectionState,
    active_qualifiers: HashMap<&'static str, Qualifier>,
    instruments: Vec<String>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl SelectionStore {
    pub fn new(registry: CategoryRegistry, setup: Setup) -> Self {
        let active_qualifiers = registry
            .iter()
            .filter_map(|cat| cat.qualifier.map(|kind| (cat.key, kind.default_qualifier())))
            .collect();
        let state = SelectionState::new(&registry, setup);
        Self {
            registry,
            state,
            active_qualifiers,
            instruments: Vec::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Restrict instrument changes to `instruments`. An empty list accepts
    /// any non-blank instrument.
    pub fn with_instruments(mut self, instruments: Vec<String>) -> Self {
        self.instruments = instruments;
        self
    }

    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// The offered spelling of `instrument`, matched case-insensitively.
    pub fn offered_instrument<'a>(&'a self, instrument: &'a str) -> Option<&'a str> {
        let instrument = instrument.trim();
        if instrument.is_empty() {
            return None;
        }
        if self.instruments.is_empty() {
            return Some(instrument);
        }
        self.instruments
            .iter()
            .find(|offered| offered.eq_ignore_ascii_case(instrument))
            .map(String::as_str)
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> SelectionState {
        self.state.clone()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Change) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Qualifier used when a selection on `key` arrives without one.
    pub fn active_qualifier(&self, key: &str) -> Result<Option<Qualifier>, TradecheckError> {
        let cat = self.registry.get(key)?;
        Ok(self.active_qualifiers.get(cat.key).copied())
    }

    pub fn set_active_qualifier(
        &mut self,
        key: &str,
        qualifier: &str,
    ) -> Result<Qualifier, TradecheckError> {
        let cat = self.registry.get(key)?;
        let parsed = parse_qualifier(cat, qualifier)?;
        self.active_qualifiers.insert(cat.key, parsed);
        Ok(parsed)
    }

    /// Apply one option click under the category's cardinality rule.
    pub fn apply_selection(
        &mut self,
        key: &str,
        code: &str,
        qualifier: Option<&str>,
    ) -> Result<&SelectionState, TradecheckError> {
        let cat = self.registry.get(key)?;
        if !cat.accepts(code) {
            return Err(TradecheckError::UnknownOption {
                category: key.to_string(),
                code: code.to_string(),
            });
        }
        let qualifier = match (cat.qualifier, qualifier) {
            (Some(_), Some(raw)) => Some(parse_qualifier(cat, raw)?),
            (Some(_), None) => self.active_qualifiers.get(cat.key).copied(),
            (None, _) => None,
        };

        let choices = self.state.choices_mut(cat.key);
        match cat.cardinality {
            Cardinality::Single => {
                let is_sole = choices.len() == 1 && choices[0].matches(code, qualifier);
                if is_sole {
                    choices.clear();
                    debug!("{}: deselected {}", cat.key, code);
                } else {
                    *choices = vec![OptionChoice::new(cat.key, code, qualifier)];
                    debug!("{}: selected {}", cat.key, code);
                }
            }
            Cardinality::Multi => {
                match choices.iter().position(|c| c.matches(code, qualifier)) {
                    Some(index) => {
                        choices.remove(index);
                        debug!("{}: toggled off {}", cat.key, code);
                    }
                    None => {
                        choices.push(OptionChoice::new(cat.key, code, qualifier));
                        debug!("{}: toggled on {}", cat.key, code);
                    }
                }
            }
        }

        self.notify(Change::Category(cat.key.to_string()));
        Ok(&self.state)
    }

    pub fn clear_category(&mut self, key: &str) -> Result<&SelectionState, TradecheckError> {
        let cat = self.registry.get(key)?;
        let choices = self.state.choices_mut(cat.key);
        if !choices.is_empty() {
            choices.clear();
            debug!("{}: cleared", cat.key);
            self.notify(Change::Category(cat.key.to_string()));
        }
        Ok(&self.state)
    }

    /// Remove one choice by id. A missing id is not an error.
    pub fn remove_choice(
        &mut self,
        key: &str,
        id: Uuid,
    ) -> Result<&SelectionState, TradecheckError> {
        let cat = self.registry.get(key)?;
        let choices = self.state.choices_mut(cat.key);
        if let Some(index) = choices.iter().position(|c| c.id == id) {
            let removed = choices.remove(index);
            debug!("{}: removed {}", cat.key, removed.code);
            self.notify(Change::Category(cat.key.to_string()));
        }
        Ok(&self.state)
    }

    pub fn set_setup_field(
        &mut self,
        field: SetupField,
    ) -> Result<&SelectionState, TradecheckError> {
        let name = field.name();
        let before = self.state.setup.clone();
        match field {
            SetupField::Date { kind, value } => {
                let value = parse_calendar_date(&value)?;
                self.state.setup.date = DateSelection { kind, value };
            }
            SetupField::Instrument(instrument) => {
                if instrument.trim().is_empty() {
                    return Err(TradecheckError::InvalidSetup {
                        field: name.into(),
                        reason: "instrument must not be empty".into(),
                    });
                }
                let offered = self
                    .offered_instrument(&instrument)
                    .map(str::to_string)
                    .ok_or_else(|| TradecheckError::InvalidSetup {
                        field: name.into(),
                        reason: format!("{} is not an offered instrument", instrument.trim()),
                    })?;
                self.state.setup.instrument = offered;
            }
            SetupField::Direction(direction) => {
                self.state.setup.direction = direction;
            }
        }
        if self.state.setup != before {
            debug!("setup.{} updated", name);
            self.notify(Change::Setup(name));
        }
        Ok(&self.state)
    }

    fn notify(&mut self, change: Change) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&change);
        }
    }
}

fn parse_qualifier(cat: &Category, raw: &str) -> Result<Qualifier, TradecheckError> {
    cat.qualifier
        .and_then(|kind| kind.parse(raw))
        .ok_or_else(|| TradecheckError::UnknownQualifier {
            category: cat.key.to_string(),
            qualifier: raw.to_string(),
        })
}
