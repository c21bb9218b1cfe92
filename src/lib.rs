//! tradecheck: trading setup checklist core.
//!
//! Hexagonal architecture: the category registry, selection store, summary
//! projection and cross-reference rules live in [`domain`], port traits for
//! storage, configuration and image export in [`ports`], and concrete
//! implementations in [`adapters`].

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::checklist::Checklist;
pub use domain::error::TradecheckError;
