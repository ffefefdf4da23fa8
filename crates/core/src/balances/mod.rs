//! Period-scoped balance aggregation.
//!
//! Balances are always derived by scanning posted journal lines, never
//! by mutating a running counter on the account. Re-computation after a
//! correction therefore always agrees with the journal.

pub mod aggregator;
pub mod period;

pub use aggregator::{AccountPeriodBalance, BalanceAggregator, GeneralLedgerLine};
pub use period::Period;
