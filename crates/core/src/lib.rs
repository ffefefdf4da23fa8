//! Accounting core for Tavolo.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and derivations for
//! the per-store ledger live here.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts and the reference account plan
//! - `journal` - Double-entry journal engine (entries, lines, numbering)
//! - `posting` - Automatic posting rules for order/payment events
//! - `balances` - Period-scoped balance aggregation and general ledger
//! - `reports` - Trial balance and financial statements
//! - `tax` - VAT rates, per-line computation, and period netting
//! - `cache` - Short-TTL chart cache
//! - `ledger` - The facade wiring it all together

pub mod accounts;
pub mod balances;
pub mod cache;
pub mod journal;
pub mod ledger;
pub mod posting;
pub mod reports;
pub mod tax;

pub use ledger::Ledger;
