//! Durable key-value storage port trait.

use crate::domain::error::TradecheckError;

/// String-valued key-value store. Implementations report failures as
/// [`TradecheckError::StorageUnavailable`]; callers decide whether to degrade.
pub trait StoragePort {
    fn get(&self, key: &str) -> Result<Option<String>, TradecheckError>;

    fn set(&self, key: &str, value: &str) -> Result<(), TradecheckError>;

    fn remove(&self, key: &str) -> Result<(), TradecheckError>;
}
