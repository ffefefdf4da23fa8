//! Sequential entry numbering.
//!
//! Numbers are formatted `{fiscalYear}{month:02}{seq:04}` where the
//! sequence counts entries recorded for the store and fiscal year.
//! Allocation is the ledger's one critical section: it must never hand
//! the same sequence to two concurrent writers, and it holds no lock
//! beyond the atomic increment.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{Datelike, NaiveDate};
use dashmap::DashMap;
use tavolo_shared::types::StoreId;

/// Formats an entry number from its parts.
#[must_use]
pub fn format_entry_number(fiscal_year: i32, month: u32, sequence: u32) -> String {
    format!("{fiscal_year}{month:02}{sequence:04}")
}

/// Hands out per-(store, fiscal year) sequence numbers.
///
/// Counters are monotonic atomics in a concurrent map; there is no
/// cross-store coordination.
#[derive(Default)]
pub struct EntryNumberAllocator {
    counters: DashMap<(StoreId, i32), AtomicU32>,
}

impl EntryNumberAllocator {
    /// Creates an allocator with no issued numbers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next entry number for a store on the given date.
    ///
    /// The sequence is the count of entries already recorded for the
    /// store and fiscal year, plus one.
    #[must_use]
    pub fn next(&self, store_id: StoreId, date: NaiveDate) -> String {
        let fiscal_year = date.year();
        let counter = self
            .counters
            .entry((store_id, fiscal_year))
            .or_insert_with(|| AtomicU32::new(0));
        let sequence = counter.fetch_add(1, Ordering::SeqCst) + 1;
        drop(counter);

        format_entry_number(fiscal_year, date.month(), sequence)
    }

    /// Returns how many numbers have been issued for a store and year.
    #[must_use]
    pub fn issued(&self, store_id: StoreId, fiscal_year: i32) -> u32 {
        self.counters
            .get(&(store_id, fiscal_year))
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }
}
