//! Core domain types and logic.

pub mod category;
pub mod checklist;
pub mod config_validation;
pub mod error;
pub mod export;
pub mod persistence;
pub mod projector;
pub mod registry;
pub mod resolver;
pub mod selection;
pub mod settings;
pub mod store;
