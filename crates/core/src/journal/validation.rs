//! Business rule validation for journal operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tavolo_shared::types::within_tolerance;

use super::error::LedgerError;
use super::types::{NewEntry, NewLine};
use crate::accounts::error::ChartError;
use crate::accounts::types::ChartOfAccounts;

/// Earliest date the platform accepts; guards against zeroed dates
/// arriving from upstream deserialization.
const EARLIEST_ENTRY_DATE: Option<NaiveDate> = NaiveDate::from_ymd_opt(2000, 1, 1);

/// Validates an entry header, collecting every violated field.
///
/// # Errors
///
/// Returns [`LedgerError::Validation`] naming all violations, never
/// just the first.
pub fn validate_header(input: &NewEntry) -> Result<(), LedgerError> {
    let mut fields = Vec::new();

    if input.description.trim().is_empty() {
        fields.push("description".to_string());
    }
    if input.author.into_inner().is_nil() {
        fields.push("author".to_string());
    }
    if EARLIEST_ENTRY_DATE.is_some_and(|earliest| input.date < earliest) {
        fields.push("date".to_string());
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::Validation { fields })
    }
}

/// Validates a batch of lines against the store's chart.
///
/// # Errors
///
/// Returns the first structural violation: empty batch, unknown or
/// non-postable account, zero/negative amounts, or a line carrying both
/// sides.
pub fn validate_lines(chart: &ChartOfAccounts, lines: &[NewLine]) -> Result<(), LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    for line in lines {
        let account =
            chart
                .account(&line.account_code)
                .ok_or_else(|| ChartError::AccountNotFound {
                    store_id: chart.store_id,
                    code: line.account_code.clone(),
                })?;
        if !account.postable {
            return Err(LedgerError::AccountNotPostable(account.code.clone()));
        }
        if !account.active {
            return Err(LedgerError::AccountInactive(account.code.clone()));
        }

        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if line.debit > Decimal::ZERO && line.credit > Decimal::ZERO {
            return Err(LedgerError::BothSides(account.code.clone()));
        }
        if line.debit == Decimal::ZERO && line.credit == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
    }

    Ok(())
}

/// Validates the whole-entry balance invariant.
///
/// # Errors
///
/// Returns [`LedgerError::Unbalanced`] with both totals when they
/// differ by more than the tolerance.
pub fn validate_balance(lines: &[NewLine], tolerance: Decimal) -> Result<(), LedgerError> {
    let debit_total: Decimal = lines.iter().map(|l| l.debit).sum();
    let credit_total: Decimal = lines.iter().map(|l| l.credit).sum();

    if within_tolerance(debit_total, credit_total, tolerance) {
        Ok(())
    } else {
        Err(LedgerError::Unbalanced {
            debit_total,
            credit_total,
        })
    }
}
