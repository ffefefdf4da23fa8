//! Shared types, errors, and configuration for the Tavolo ledger.
//!
//! This crate holds the building blocks every other crate relies on:
//! typed IDs, money helpers, and runtime configuration. It carries no
//! domain logic of its own.

pub mod config;
pub mod error;
pub mod types;

pub use config::LedgerConfig;
pub use error::{SharedError, SharedResult};
