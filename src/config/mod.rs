//! Engine Configuration Module
//!
//! Standards tables and reconciliation tuning loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `RIGBOOK_CONFIG` environment variable (path to TOML file)
//! 2. `rigbook.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded config is handed to `ReconciliationEngine::from_config` once;
//! the engine keeps its own copy of the tables and never re-reads them.

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;
