//! Report error types.
//!
//! Reports add no swallowing layer: the underlying chart or ledger
//! error is surfaced verbatim. Returning zero balances instead would
//! misstate financial results.

use thiserror::Error;

use crate::accounts::error::ChartError;
use crate::journal::error::LedgerError;

/// Errors raised while generating reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A chart lookup failed.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ReportError {
    /// Returns the error code of the underlying failure.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Chart(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
        }
    }
}
