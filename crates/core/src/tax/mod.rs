//! VAT computation.
//!
//! Per-line VAT by rate category, and period-level netting of VAT
//! collected against VAT deductible. The period calculation is the one
//! place this module writes the ledger: it synthesizes the VAT journal
//! entries through the journal engine.

pub mod calculator;
pub mod error;
pub mod rates;
pub mod types;

pub use calculator::{calculate_line_vat, extract_from_total, TaxService};
pub use error::TaxError;
pub use rates::VatRateCategory;
pub use types::{LineVat, VatReport, VatReportStatus};
