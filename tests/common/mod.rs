#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::cell::{Cell, RefCell};
use tradecheck::adapters::memory_storage_adapter::MemoryStorageAdapter;
use tradecheck::domain::checklist::Checklist;
use tradecheck::domain::error::TradecheckError;
use tradecheck::domain::registry::CategoryRegistry;
use tradecheck::domain::selection::{Direction, Setup};
use tradecheck::domain::settings::Settings;
use tradecheck::domain::store::SelectionStore;
use tradecheck::ports::export_port::{ExportPort, RenderRegion};
use tradecheck::ports::storage_port::StoragePort;

/// Records every region it is asked to rasterize. Fails while `failing` is set.
pub struct RecordingExportPort {
    pub regions: RefCell<Vec<RenderRegion>>,
    pub failing: Cell<bool>,
}

impl RecordingExportPort {
    pub fn new() -> Self {
        Self {
            regions: RefCell::new(Vec::new()),
            failing: Cell::new(false),
        }
    }

    pub fn failing() -> Self {
        let port = Self::new();
        port.failing.set(true);
        port
    }

    pub fn last_markup(&self) -> String {
        self.regions
            .borrow()
            .last()
            .map(|r| r.markup.clone())
            .unwrap_or_default()
    }
}

impl ExportPort for RecordingExportPort {
    fn rasterize(&self, region: &RenderRegion) -> Result<Vec<u8>, TradecheckError> {
        self.regions.borrow_mut().push(region.clone());
        if self.failing.get() {
            return Err(TradecheckError::ExportFailure {
                reason: "rasterizer crashed".into(),
            });
        }
        Ok(vec![0xFF, 0xD8, 0xFF, 0xE0])
    }
}

/// Storage that rejects every call, like a browser with storage disabled.
pub struct FailingStorage;

impl StoragePort for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, TradecheckError> {
        Err(TradecheckError::StorageUnavailable {
            reason: "access denied".into(),
        })
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), TradecheckError> {
        Err(TradecheckError::StorageUnavailable {
            reason: "access denied".into(),
        })
    }

    fn remove(&self, _key: &str) -> Result<(), TradecheckError> {
        Err(TradecheckError::StorageUnavailable {
            reason: "access denied".into(),
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn today() -> NaiveDate {
    date(2024, 6, 3)
}

pub fn now() -> NaiveDateTime {
    today().and_hms_opt(16, 5, 9).unwrap()
}

pub fn make_store() -> SelectionStore {
    SelectionStore::new(
        CategoryRegistry::standard(),
        Setup::new(today(), "XAUUSD", Direction::Buy),
    )
}

pub fn make_checklist(storage: &MemoryStorageAdapter) -> Checklist {
    Checklist::new(Settings::default(), Box::new(storage.clone()), today())
}

pub fn two_instrument_settings() -> Settings {
    let mut settings = Settings::default();
    settings.setup.instruments = vec!["XAUUSD".into(), "EURUSD".into()];
    settings
}
