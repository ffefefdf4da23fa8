//! Double-entry journal engine.
//!
//! This module implements the heart of the ledger:
//! - Journal entries and lines
//! - The fundamental balance invariant (debits = credits within tolerance)
//! - Atomic per-store entry numbering
//! - Reversing entries for corrections (posted entries are immutable)

pub mod error;
pub mod numbering;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod store_props;

pub use error::LedgerError;
pub use numbering::EntryNumberAllocator;
pub use store::Journal;
pub use types::{EntryStatus, JournalCode, JournalEntry, JournalLine, NewEntry, NewLine};
