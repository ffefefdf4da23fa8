//! The journal engine.
//!
//! Owns every store's entries and enforces the write path: validated
//! headers, atomic numbering, all-or-nothing line attachment, and
//! reversal-only corrections.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tavolo_shared::types::{EntryId, LineId, StoreId};
use tavolo_shared::LedgerConfig;

use super::error::LedgerError;
use super::numbering::EntryNumberAllocator;
use super::types::{EntryStatus, JournalEntry, JournalLine, NewEntry, NewLine};
use super::validation::{validate_balance, validate_header, validate_lines};
use crate::accounts::store::ChartStore;

/// Attempts at entry-number allocation before giving up. A conflict can
/// only happen if the uniqueness index and the counter diverge, so one
/// retry is already generous.
const MAX_NUMBER_ATTEMPTS: u32 = 3;

/// The journal engine for all stores.
pub struct Journal {
    config: Arc<LedgerConfig>,
    charts: Arc<ChartStore>,
    entries: DashMap<EntryId, JournalEntry>,
    by_store: DashMap<StoreId, Vec<EntryId>>,
    numbers: DashMap<(StoreId, String), EntryId>,
    allocator: EntryNumberAllocator,
}

impl Journal {
    /// Creates an empty journal backed by the given chart store.
    #[must_use]
    pub fn new(config: Arc<LedgerConfig>, charts: Arc<ChartStore>) -> Self {
        Self {
            config,
            charts,
            entries: DashMap::new(),
            by_store: DashMap::new(),
            numbers: DashMap::new(),
            allocator: EntryNumberAllocator::new(),
        }
    }

    /// Creates a draft entry with no lines.
    ///
    /// The entry number is assigned here, atomically per store and
    /// fiscal year. The entry stays out of all balance computations
    /// until balanced lines are attached.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] listing every invalid header
    /// field, or a chart error if the store is not onboarded.
    pub fn create_entry(&self, input: NewEntry) -> Result<EntryId, LedgerError> {
        validate_header(&input)?;
        self.charts.require_chart(input.store_id)?;

        let id = EntryId::new();
        let entry_number = self.claim_entry_number(input.store_id, &input, id)?;

        let entry = JournalEntry {
            id,
            store_id: input.store_id,
            entry_number: entry_number.clone(),
            journal_code: input.journal_code,
            date: input.date,
            description: input.description,
            author: input.author,
            status: EntryStatus::Draft,
            reversal_of: None,
            created_at: Utc::now(),
            lines: Vec::new(),
        };

        self.entries.insert(id, entry);
        self.by_store.entry(input.store_id).or_default().push(id);
        tracing::debug!(entry_id = %id, entry_number, "draft entry created");
        Ok(id)
    }

    /// Attaches lines to a draft entry, all or nothing.
    ///
    /// Lines are stamped with the entry's date and store, validated
    /// against the chart, and the whole-entry balance invariant is
    /// checked before anything is attached. On success the entry
    /// becomes Posted; on any failure the entry is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unbalanced`] with both totals if the
    /// lines do not balance, [`LedgerError::EntryImmutable`] if the
    /// entry is already posted, or a line validation error.
    pub fn add_lines(&self, entry_id: EntryId, lines: Vec<NewLine>) -> Result<(), LedgerError> {
        let (store_id, date, status) = {
            let entry = self
                .entries
                .get(&entry_id)
                .ok_or(LedgerError::EntryNotFound(entry_id))?;
            (entry.store_id, entry.date, entry.status)
        };
        if !status.is_editable() {
            return Err(LedgerError::EntryImmutable(entry_id));
        }

        let chart = self.charts.require_chart(store_id)?;
        validate_lines(&chart, &lines)?;
        validate_balance(&lines, self.config.balance_tolerance)?;

        let stamped: Vec<JournalLine> = lines
            .into_iter()
            .map(|line| JournalLine {
                id: LineId::new(),
                entry_id,
                store_id,
                date,
                account_code: line.account_code,
                debit: line.debit,
                credit: line.credit,
                description: line.description,
                order_id: line.order_id,
            })
            .collect();

        let mut entry = self
            .entries
            .get_mut(&entry_id)
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        // Re-check under the write lock; a concurrent caller may have
        // posted the entry between validation and here.
        if !entry.status.is_editable() {
            return Err(LedgerError::EntryImmutable(entry_id));
        }
        entry.lines = stamped;
        entry.status = EntryStatus::Posted;
        tracing::info!(
            entry_id = %entry_id,
            entry_number = %entry.entry_number,
            debit = %entry.debit_total(),
            "entry posted"
        );
        Ok(())
    }

    /// Creates a reversing entry for a posted entry.
    ///
    /// Every line's debit and credit are swapped; the original is
    /// flagged Reversed but its lines are untouched, preserving the
    /// audit trail.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EntryNotPosted`] for drafts and
    /// [`LedgerError::AlreadyReversed`] for repeat reversals.
    pub fn reverse_entry(&self, entry_id: EntryId) -> Result<EntryId, LedgerError> {
        // Claim the reversal under the write lock so concurrent callers
        // cannot both reverse the same entry.
        let original = {
            let mut entry = self
                .entries
                .get_mut(&entry_id)
                .ok_or(LedgerError::EntryNotFound(entry_id))?;
            match entry.status {
                EntryStatus::Draft => return Err(LedgerError::EntryNotPosted(entry_id)),
                EntryStatus::Reversed => return Err(LedgerError::AlreadyReversed(entry_id)),
                EntryStatus::Posted => {
                    entry.status = EntryStatus::Reversed;
                    entry.clone()
                }
            }
        };

        let reversal = self.build_reversal(&original);
        let reversal = match reversal {
            Ok(entry) => entry,
            Err(err) => {
                // Allocation failed; release the claim.
                if let Some(mut entry) = self.entries.get_mut(&entry_id) {
                    entry.status = EntryStatus::Posted;
                }
                return Err(err);
            }
        };

        let reversal_id = reversal.id;
        self.entries.insert(reversal_id, reversal);
        self.by_store
            .entry(original.store_id)
            .or_default()
            .push(reversal_id);
        tracing::info!(
            original = %entry_id,
            reversal = %reversal_id,
            "entry reversed"
        );
        Ok(reversal_id)
    }

    /// Returns a snapshot of an entry.
    #[must_use]
    pub fn get_entry(&self, entry_id: EntryId) -> Option<JournalEntry> {
        self.entries.get(&entry_id).map(|e| e.clone())
    }

    /// Removes a draft entry that will never receive lines.
    ///
    /// Used by the posting rules to discard a partially built entry
    /// after a line failure. Its entry number stays consumed so numbers
    /// are never reused. Posted entries are not removable.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EntryImmutable`] if the entry is posted.
    pub fn discard_draft(&self, entry_id: EntryId) -> Result<(), LedgerError> {
        let removed = self
            .entries
            .remove_if(&entry_id, |_, entry| entry.status.is_editable());
        match removed {
            Some((_, entry)) => {
                if let Some(mut ids) = self.by_store.get_mut(&entry.store_id) {
                    ids.retain(|id| *id != entry_id);
                }
                tracing::debug!(entry_id = %entry_id, "draft entry discarded");
                Ok(())
            }
            None if self.entries.contains_key(&entry_id) => {
                Err(LedgerError::EntryImmutable(entry_id))
            }
            None => Err(LedgerError::EntryNotFound(entry_id)),
        }
    }

    /// Returns a snapshot of every posted line for a store.
    ///
    /// Draft entries are excluded; reversed entries and their reversals
    /// both contribute (they net to zero).
    #[must_use]
    pub fn posted_lines(&self, store_id: StoreId) -> Vec<JournalLine> {
        let Some(ids) = self.by_store.get(&store_id).map(|v| v.clone()) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.entries.get(id))
            .filter(|entry| entry.status.is_posted())
            .flat_map(|entry| entry.lines.clone())
            .collect()
    }

    /// Returns snapshots of every entry for a store, drafts included.
    #[must_use]
    pub fn entries_for_store(&self, store_id: StoreId) -> Vec<JournalEntry> {
        let Some(ids) = self.by_store.get(&store_id).map(|v| v.clone()) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.entries.get(id).map(|e| e.clone()))
            .collect()
    }

    fn build_reversal(&self, original: &JournalEntry) -> Result<JournalEntry, LedgerError> {
        let id = EntryId::new();
        let header = NewEntry {
            store_id: original.store_id,
            journal_code: original.journal_code,
            date: original.date,
            description: format!("Reversal of {}", original.entry_number),
            author: original.author,
        };
        let entry_number = self.claim_entry_number(original.store_id, &header, id)?;

        let lines = original
            .lines
            .iter()
            .map(|line| JournalLine {
                id: LineId::new(),
                entry_id: id,
                store_id: line.store_id,
                date: line.date,
                account_code: line.account_code.clone(),
                // Swap sides; everything else is preserved.
                debit: line.credit,
                credit: line.debit,
                description: format!("Reversal: {}", line.description),
                order_id: line.order_id,
            })
            .collect();

        Ok(JournalEntry {
            id,
            store_id: original.store_id,
            entry_number,
            journal_code: original.journal_code,
            date: original.date,
            description: header.description,
            author: original.author,
            status: EntryStatus::Posted,
            reversal_of: Some(original.id),
            created_at: Utc::now(),
            lines,
        })
    }

    /// Allocates an entry number and records it in the uniqueness
    /// index, retrying on conflict so collisions never surface to
    /// callers.
    fn claim_entry_number(
        &self,
        store_id: StoreId,
        input: &NewEntry,
        entry_id: EntryId,
    ) -> Result<String, LedgerError> {
        let mut last_conflict = None;
        for _ in 0..MAX_NUMBER_ATTEMPTS {
            let number = self.allocator.next(store_id, input.date);
            match self.numbers.entry((store_id, number.clone())) {
                dashmap::mapref::entry::Entry::Vacant(slot) => {
                    slot.insert(entry_id);
                    return Ok(number);
                }
                dashmap::mapref::entry::Entry::Occupied(_) => {
                    tracing::warn!(%store_id, number, "entry number conflict, retrying");
                    last_conflict = Some(number);
                }
            }
        }
        Err(LedgerError::SequenceConflict {
            store_id,
            entry_number: last_conflict.unwrap_or_default(),
        })
    }
}
