//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use tavolo_shared::types::{EntryId, StoreId};
use thiserror::Error;

use crate::accounts::error::ChartError;

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// One or more required header fields are missing or invalid.
    ///
    /// Every violated field is listed so callers can report them all at
    /// once rather than fixing one at a time.
    #[error("Entry validation failed: {}", fields.join(", "))]
    Validation {
        /// Names of every violated field.
        fields: Vec<String>,
    },

    /// The entry's lines do not balance (debits != credits).
    #[error("Entry is not balanced. Debit: {debit_total}, Credit: {credit_total}")]
    Unbalanced {
        /// Total debit amount across all lines.
        debit_total: Decimal,
        /// Total credit amount across all lines.
        credit_total: Decimal,
    },

    /// An entry must carry at least one line.
    #[error("Entry must have at least one line")]
    NoLines,

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// A line must carry either a debit or a credit, not both.
    #[error("Line on account {0} carries both a debit and a credit")]
    BothSides(String),

    // ========== Account Errors ==========
    /// The chart or one of its accounts is missing.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// The account exists but does not accept direct postings.
    #[error("Account {0} does not accept postings")]
    AccountNotPostable(String),

    /// The account has been deactivated.
    #[error("Account {0} is inactive")]
    AccountInactive(String),

    // ========== Entry State Errors ==========
    /// The entry does not exist.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Posted entries are immutable; corrections go through reversal.
    #[error("Cannot modify posted entry {0}")]
    EntryImmutable(EntryId),

    /// Only posted entries can be reversed.
    #[error("Entry {0} is not posted and cannot be reversed")]
    EntryNotPosted(EntryId),

    /// The entry has already been reversed.
    #[error("Entry {0} has already been reversed")]
    AlreadyReversed(EntryId),

    // ========== Concurrency Errors ==========
    /// Two writers raced for the same entry number; retry allocation.
    #[error("Entry number {entry_number} already taken for store {store_id}, please retry")]
    SequenceConflict {
        /// The store whose sequence collided.
        store_id: StoreId,
        /// The colliding entry number.
        entry_number: String,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::NoLines => "NO_LINES",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::BothSides(_) => "BOTH_SIDES",
            Self::Chart(e) => e.error_code(),
            Self::AccountNotPostable(_) => "ACCOUNT_NOT_POSTABLE",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::EntryImmutable(_) => "ENTRY_IMMUTABLE",
            Self::EntryNotPosted(_) => "ENTRY_NOT_POSTED",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::SequenceConflict { .. } => "SEQUENCE_CONFLICT",
        }
    }

    /// Returns true if the operation can be retried as-is.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SequenceConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_lists_all_fields() {
        let err = LedgerError::Validation {
            fields: vec!["date".to_string(), "description".to_string()],
        };
        assert_eq!(err.to_string(), "Entry validation failed: date, description");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_unbalanced_display() {
        let err = LedgerError::Unbalanced {
            debit_total: dec!(121.00),
            credit_total: dec!(100.00),
        };
        assert_eq!(
            err.to_string(),
            "Entry is not balanced. Debit: 121.00, Credit: 100.00"
        );
    }

    #[test]
    fn test_chart_error_code_passthrough() {
        let err = LedgerError::from(ChartError::ChartNotFound(StoreId::new()));
        assert_eq!(err.error_code(), "CHART_NOT_FOUND");
    }

    #[test]
    fn test_retryable_errors() {
        let conflict = LedgerError::SequenceConflict {
            store_id: StoreId::new(),
            entry_number: "2026010001".to_string(),
        };
        assert!(conflict.is_retryable());
        assert!(!LedgerError::NoLines.is_retryable());
        assert!(
            !LedgerError::Unbalanced {
                debit_total: dec!(1),
                credit_total: dec!(2)
            }
            .is_retryable()
        );
    }
}
