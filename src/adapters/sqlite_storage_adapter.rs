//! SQLite storage adapter: a single key/value table behind an r2d2 pool.

use crate::domain::error::TradecheckError;
use crate::ports::storage_port::StoragePort;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use std::path::Path;

pub struct SqliteStorageAdapter {
    pool: Pool<SqliteConnectionManager>,
}

fn pool_error(e: r2d2::Error) -> TradecheckError {
    TradecheckError::StorageUnavailable {
        reason: e.to_string(),
    }
}

fn query_error(e: rusqlite::Error) -> TradecheckError {
    TradecheckError::StorageUnavailable {
        reason: e.to_string(),
    }
}

impl SqliteStorageAdapter {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TradecheckError> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(2).build(manager).map_err(pool_error)?;
        let adapter = Self { pool };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    pub fn in_memory() -> Result<Self, TradecheckError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager).map_err(pool_error)?;
        let adapter = Self { pool };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, TradecheckError> {
        self.pool.get().map_err(pool_error)
    }

    fn initialize_schema(&self) -> Result<(), TradecheckError> {
        self.conn()?
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                );",
            )
            .map_err(query_error)
    }
}

impl StoragePort for SqliteStorageAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, TradecheckError> {
        self.conn()?
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(query_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TradecheckError> {
        self.conn()?
            .execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
            .map_err(query_error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TradecheckError> {
        self.conn()?
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(query_error)?;
        Ok(())
    }
}
