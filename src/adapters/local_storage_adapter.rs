//! Browser `localStorage` adapter (wasm32 only).

use crate::domain::error::TradecheckError;
use crate::ports::storage_port::StoragePort;
use wasm_bindgen::JsValue;
use web_sys::Storage;

fn js_error(e: JsValue) -> TradecheckError {
    TradecheckError::StorageUnavailable {
        reason: e.as_string().unwrap_or_else(|| format!("{e:?}")),
    }
}

pub struct LocalStorageAdapter {
    storage: Storage,
}

impl LocalStorageAdapter {
    pub fn open() -> Result<Self, TradecheckError> {
        let window = web_sys::window().ok_or_else(|| TradecheckError::StorageUnavailable {
            reason: "no window".into(),
        })?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| TradecheckError::StorageUnavailable {
                reason: "localStorage unavailable".into(),
            })?;
        Ok(Self { storage })
    }
}

impl StoragePort for LocalStorageAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, TradecheckError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TradecheckError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), TradecheckError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}
