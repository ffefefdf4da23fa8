//! Financial reporting.
//!
//! Trial balance and derived statements (balance sheet, income
//! statement). All figures come from the balance aggregator; a failure
//! underneath surfaces verbatim so callers can tell "zero activity"
//! from "computation failed".

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::{
    BalanceSheet, BalanceSheetSection, FinancialStatement, IncomeStatement,
    IncomeStatementSection, StatementRow, StatementType, TrialBalance, TrialBalanceRow,
    TrialBalanceTotals,
};
