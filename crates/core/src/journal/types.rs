//! Journal entry and line domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tavolo_shared::types::{within_tolerance, EntryId, LineId, OrderId, StoreId, UserId};

/// Journal a transaction is recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalCode {
    /// Sales journal ("VT").
    Sales,
    /// Bank and cash journal ("BK").
    Bank,
    /// Tax journal ("TVA").
    Tax,
    /// General operations journal ("OD").
    General,
}

impl JournalCode {
    /// Returns the short journal code used on printed ledgers.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sales => "VT",
            Self::Bank => "BK",
            Self::Tax => "TVA",
            Self::General => "OD",
        }
    }
}

impl std::fmt::Display for JournalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Entry lifecycle status.
///
/// Entries progress Draft -> Posted, and Posted -> Reversed when a
/// correction is recorded. Posted and Reversed entries are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Created but not yet carrying balanced lines. Excluded from all
    /// balance computations.
    Draft,
    /// Carrying balanced lines; part of the ledger.
    Posted,
    /// Posted, and later offset by a reversing entry. Lines untouched.
    Reversed,
}

impl EntryStatus {
    /// Returns true if the entry participates in balance computations.
    #[must_use]
    pub fn is_posted(self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }

    /// Returns true if lines may still be attached.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }
}

/// A single debit or credit posting within an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: LineId,
    /// The entry this line belongs to.
    pub entry_id: EntryId,
    /// The store, stamped from the parent entry.
    pub store_id: StoreId,
    /// Accounting date, stamped from the parent entry.
    pub date: NaiveDate,
    /// Code of the account this line posts to.
    pub account_code: String,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
    /// Line description.
    pub description: String,
    /// Source order, for traceability of auto-generated postings.
    pub order_id: Option<OrderId>,
}

impl JournalLine {
    /// Returns the signed amount (debit positive, credit negative).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A journal entry: a dated, numbered set of balanced lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: EntryId,
    /// The store whose ledger this entry belongs to.
    pub store_id: StoreId,
    /// Sequential number, unique per store and fiscal year,
    /// formatted `{year}{month:02}{seq:04}`.
    pub entry_number: String,
    /// Journal this entry is recorded in.
    pub journal_code: JournalCode,
    /// Accounting date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// User who recorded the entry.
    pub author: UserId,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// The entry this one reverses, if any.
    pub reversal_of: Option<EntryId>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// The lines. Empty while Draft; balanced once Posted.
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Sum of all line debits.
    #[must_use]
    pub fn debit_total(&self) -> Decimal {
        self.lines.iter().map(|l| l.debit).sum()
    }

    /// Sum of all line credits.
    #[must_use]
    pub fn credit_total(&self) -> Decimal {
        self.lines.iter().map(|l| l.credit).sum()
    }

    /// Returns true if debits equal credits within the tolerance.
    #[must_use]
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        within_tolerance(self.debit_total(), self.credit_total(), tolerance)
    }
}

/// Input for creating a new entry header.
#[derive(Debug, Clone)]
pub struct NewEntry {
    /// The store to record the entry for.
    pub store_id: StoreId,
    /// Journal to record in.
    pub journal_code: JournalCode,
    /// Accounting date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// User recording the entry.
    pub author: UserId,
}

/// Input for a line to attach to an entry.
///
/// Exactly one of `debit` / `credit` must be nonzero; date and store are
/// stamped from the parent entry.
#[derive(Debug, Clone)]
pub struct NewLine {
    /// Code of the account to post to.
    pub account_code: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Line description.
    pub description: String,
    /// Source order, if this line was derived from one.
    pub order_id: Option<OrderId>,
}

impl NewLine {
    /// Builds a debit line.
    #[must_use]
    pub fn debit(account_code: &str, amount: Decimal, description: &str) -> Self {
        Self {
            account_code: account_code.to_string(),
            debit: amount,
            credit: Decimal::ZERO,
            description: description.to_string(),
            order_id: None,
        }
    }

    /// Builds a credit line.
    #[must_use]
    pub fn credit(account_code: &str, amount: Decimal, description: &str) -> Self {
        Self {
            account_code: account_code.to_string(),
            debit: Decimal::ZERO,
            credit: amount,
            description: description.to_string(),
            order_id: None,
        }
    }

    /// Attaches the source order.
    #[must_use]
    pub fn for_order(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }
}
