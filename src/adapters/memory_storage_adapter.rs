//! In-process storage adapter.
//!
//! Clones share one map, so a test can keep a handle on what a
//! [`PersistenceAdapter`](crate::domain::persistence::PersistenceAdapter)
//! wrote. Also the fallback when the configured backend cannot be opened.

use crate::domain::error::TradecheckError;
use crate::ports::storage_port::StoragePort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorageAdapter {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StoragePort for MemoryStorageAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, TradecheckError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TradecheckError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TradecheckError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
