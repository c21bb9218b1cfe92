//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod file_storage_adapter;
#[cfg(target_arch = "wasm32")]
pub mod local_storage_adapter;
pub mod memory_storage_adapter;
#[cfg(feature = "sqlite")]
pub mod sqlite_storage_adapter;
pub mod summary_report;

use crate::domain::error::TradecheckError;
use crate::domain::settings::{StorageBackend, StorageSettings};
use crate::ports::storage_port::StoragePort;
use log::{info, warn};
use memory_storage_adapter::MemoryStorageAdapter;
use std::path::PathBuf;

/// Open the configured backend. Falls back to in-memory storage when the
/// backend cannot be opened, so the checklist keeps working for the session.
pub fn open_storage(settings: &StorageSettings) -> Box<dyn StoragePort> {
    match try_open_storage(settings) {
        Ok(storage) => storage,
        Err(e) => {
            warn!("storage backend {:?} unavailable, using memory: {e}", settings.backend);
            Box::new(MemoryStorageAdapter::new())
        }
    }
}

pub fn try_open_storage(
    settings: &StorageSettings,
) -> Result<Box<dyn StoragePort>, TradecheckError> {
    match settings.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStorageAdapter::new())),
        StorageBackend::File => {
            let path = required_path(settings)?;
            info!("using file storage at {}", path.display());
            Ok(Box::new(file_storage_adapter::FileStorageAdapter::open(path)?))
        }
        StorageBackend::Sqlite => open_sqlite(required_path(settings)?),
    }
}

fn required_path(settings: &StorageSettings) -> Result<PathBuf, TradecheckError> {
    settings
        .path
        .clone()
        .ok_or_else(|| TradecheckError::ConfigMissing {
            section: "storage".into(),
            key: "path".into(),
        })
}

#[cfg(feature = "sqlite")]
fn open_sqlite(path: PathBuf) -> Result<Box<dyn StoragePort>, TradecheckError> {
    info!("using sqlite storage at {}", path.display());
    Ok(Box::new(sqlite_storage_adapter::SqliteStorageAdapter::open(path)?))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_path: PathBuf) -> Result<Box<dyn StoragePort>, TradecheckError> {
    Err(TradecheckError::StorageUnavailable {
        reason: "sqlite support is not compiled in".into(),
    })
}

/// Browser `localStorage`, or memory when the page has none.
#[cfg(target_arch = "wasm32")]
pub fn open_browser_storage() -> Box<dyn StoragePort> {
    match local_storage_adapter::LocalStorageAdapter::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            warn!("localStorage unavailable, using memory: {e}");
            Box::new(MemoryStorageAdapter::new())
        }
    }
}
