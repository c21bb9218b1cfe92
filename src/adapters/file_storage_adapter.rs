//! Directory-backed storage adapter: one file per key.

use crate::domain::error::TradecheckError;
use crate::ports::storage_port::StoragePort;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct FileStorageAdapter {
    base_path: PathBuf,
}

impl FileStorageAdapter {
    /// Open (creating if needed) the storage directory.
    pub fn open(base_path: PathBuf) -> Result<Self, TradecheckError> {
        fs::create_dir_all(&base_path).map_err(|e| TradecheckError::StorageUnavailable {
            reason: format!("cannot create {}: {}", base_path.display(), e),
        })?;
        Ok(Self { base_path })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", file_name))
    }
}

impl StoragePort for FileStorageAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, TradecheckError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TradecheckError::StorageUnavailable {
                reason: format!("failed to read {}: {}", path.display(), e),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TradecheckError> {
        let path = self.key_path(key);
        fs::write(&path, value).map_err(|e| TradecheckError::StorageUnavailable {
            reason: format!("failed to write {}: {}", path.display(), e),
        })
    }

    fn remove(&self, key: &str) -> Result<(), TradecheckError> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TradecheckError::StorageUnavailable {
                reason: format!("failed to remove {}: {}", path.display(), e),
            }),
        }
    }
}
