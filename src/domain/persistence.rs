//! Setup and notes persistence over a [`StoragePort`].
//!
//! Only the setup record and the free-text notes are persisted; analysis
//! categories live for the session. Nothing here returns an error: storage
//! failures are logged, switch the adapter to non-persistent mode, and loads
//! fall back to "no saved data".

use crate::domain::selection::Setup;
use crate::ports::storage_port::StoragePort;
use log::warn;
use std::cell::Cell;

pub const DEFAULT_SETUP_KEY: &str = "tradingSetup";
pub const DEFAULT_NOTES_KEY: &str = "tradingNotes";

pub struct PersistenceAdapter {
    storage: Box<dyn StoragePort>,
    setup_key: String,
    notes_key: String,
    persistent: Cell<bool>,
}

impl PersistenceAdapter {
    pub fn new(storage: Box<dyn StoragePort>, setup_key: &str, notes_key: &str) -> Self {
        Self {
            storage,
            setup_key: setup_key.to_string(),
            notes_key: notes_key.to_string(),
            persistent: Cell::new(true),
        }
    }

    pub fn with_default_keys(storage: Box<dyn StoragePort>) -> Self {
        Self::new(storage, DEFAULT_SETUP_KEY, DEFAULT_NOTES_KEY)
    }

    /// False once storage has failed; later saves are skipped.
    pub fn is_persistent(&self) -> bool {
        self.persistent.get()
    }

    pub fn save_setup(&self, setup: &Setup) {
        match serde_json::to_string(setup) {
            Ok(json) => self.write(&self.setup_key, &json),
            Err(e) => warn!("could not serialize setup: {e}"),
        }
    }

    /// Saved setup, or `None` when absent, unreadable or structurally invalid.
    pub fn load_setup(&self) -> Option<Setup> {
        let raw = self.read(&self.setup_key)?;
        let setup: Setup = match serde_json::from_str(&raw) {
            Ok(setup) => setup,
            Err(e) => {
                warn!("ignoring corrupt setup record under {}: {e}", self.setup_key);
                return None;
            }
        };
        if let Err(e) = setup.validate() {
            warn!("ignoring invalid setup record under {}: {e}", self.setup_key);
            return None;
        }
        Some(setup)
    }

    pub fn save_notes(&self, text: &str) {
        self.write(&self.notes_key, text);
    }

    /// Saved notes, or an empty string.
    pub fn load_notes(&self) -> String {
        self.read(&self.notes_key).unwrap_or_default()
    }

    fn write(&self, key: &str, value: &str) {
        if !self.persistent.get() {
            return;
        }
        if let Err(e) = self.storage.set(key, value) {
            warn!("storage write for {key} failed, continuing without persistence: {e}");
            self.persistent.set(false);
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("storage read for {key} failed, continuing without persistence: {e}");
                self.persistent.set(false);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_storage_adapter::MemoryStorageAdapter;
    use crate::domain::error::TradecheckError;
    use crate::domain::selection::{DateKind, DateSelection, Direction};
    use chrono::NaiveDate;

    struct BrokenStorage;

    impl StoragePort for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, TradecheckError> {
            Err(TradecheckError::StorageUnavailable {
                reason: "quota exceeded".into(),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), TradecheckError> {
            Err(TradecheckError::StorageUnavailable {
                reason: "quota exceeded".into(),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), TradecheckError> {
            Ok(())
        }
    }

    fn sample_setup() -> Setup {
        Setup {
            date: DateSelection {
                kind: DateKind::Custom,
                value: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
            },
            instrument: "GBPUSD".into(),
            direction: Direction::Sell,
        }
    }

    #[test]
    fn setup_round_trips() {
        let adapter = PersistenceAdapter::with_default_keys(Box::new(MemoryStorageAdapter::new()));
        adapter.save_setup(&sample_setup());
        assert_eq!(adapter.load_setup(), Some(sample_setup()));
    }

    #[test]
    fn load_setup_absent_is_none() {
        let adapter = PersistenceAdapter::with_default_keys(Box::new(MemoryStorageAdapter::new()));
        assert_eq!(adapter.load_setup(), None);
    }

    #[test]
    fn corrupt_setup_is_treated_as_absent() {
        let storage = MemoryStorageAdapter::new();
        storage.set(DEFAULT_SETUP_KEY, "{not json").unwrap();
        let adapter = PersistenceAdapter::with_default_keys(Box::new(storage));
        assert_eq!(adapter.load_setup(), None);
        assert!(adapter.is_persistent());
    }

    #[test]
    fn structurally_incompatible_setup_is_absent() {
        let storage = MemoryStorageAdapter::new();
        storage
            .set(
                DEFAULT_SETUP_KEY,
                r#"{"date":{"kind":"custom","value":"2024-13-01"},"instrument":"X","direction":"buy"}"#,
            )
            .unwrap();
        let adapter = PersistenceAdapter::with_default_keys(Box::new(storage));
        assert_eq!(adapter.load_setup(), None);
    }

    #[test]
    fn blank_instrument_record_is_absent() {
        let storage = MemoryStorageAdapter::new();
        storage
            .set(
                DEFAULT_SETUP_KEY,
                r#"{"date":{"kind":"today","value":"2024-01-01"},"instrument":" ","direction":"buy"}"#,
            )
            .unwrap();
        let adapter = PersistenceAdapter::with_default_keys(Box::new(storage));
        assert_eq!(adapter.load_setup(), None);
    }

    #[test]
    fn notes_round_trip_independently() {
        let adapter = PersistenceAdapter::with_default_keys(Box::new(MemoryStorageAdapter::new()));
        assert_eq!(adapter.load_notes(), "");
        adapter.save_notes("waited for NY open");
        adapter.save_setup(&sample_setup());
        assert_eq!(adapter.load_notes(), "waited for NY open");
    }

    #[test]
    fn custom_keys_are_used() {
        let storage = MemoryStorageAdapter::new();
        let shared = storage.clone();
        let adapter = PersistenceAdapter::new(Box::new(storage), "s", "n");
        adapter.save_notes("hello");
        assert_eq!(shared.get("n").unwrap(), Some("hello".to_string()));
        assert_eq!(shared.get(DEFAULT_NOTES_KEY).unwrap(), None);
    }

    #[test]
    fn broken_storage_degrades_silently() {
        let adapter = PersistenceAdapter::with_default_keys(Box::new(BrokenStorage));
        assert_eq!(adapter.load_setup(), None);
        assert_eq!(adapter.load_notes(), "");
        assert!(!adapter.is_persistent());
        adapter.save_setup(&sample_setup());
        adapter.save_notes("still fine");
    }

    #[test]
    fn failed_write_switches_off_persistence() {
        let adapter = PersistenceAdapter::with_default_keys(Box::new(BrokenStorage));
        assert!(adapter.is_persistent());
        adapter.save_notes("x");
        assert!(!adapter.is_persistent());
    }
}
