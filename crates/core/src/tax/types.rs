//! VAT report types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tavolo_shared::types::{EntryId, StoreId, VatReportId};

use crate::balances::period::Period;

/// Result of a per-line VAT calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineVat {
    /// Taxable base, VAT excluded.
    pub base: Decimal,
    /// Applied rate, as a percentage.
    pub rate: Decimal,
    /// VAT amount.
    pub vat_amount: Decimal,
    /// Base plus VAT.
    pub total: Decimal,
}

/// VAT report lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatReportStatus {
    /// Regenerable from the ledger.
    Draft,
    /// Filed with the tax authority (externally); frozen.
    Filed,
}

/// Period VAT figures for one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatReport {
    /// Unique identifier.
    pub id: VatReportId,
    /// The store.
    pub store_id: StoreId,
    /// The period covered.
    pub period: Period,
    /// Net revenue subject to VAT.
    pub taxable_sales: Decimal,
    /// Net purchases subject to VAT.
    pub taxable_purchases: Decimal,
    /// VAT collected on sales.
    pub vat_on_sales: Decimal,
    /// VAT deductible on purchases.
    pub vat_on_purchases: Decimal,
    /// `max(0, vat_on_sales - vat_on_purchases)`.
    pub vat_payable: Decimal,
    /// `max(0, vat_on_purchases - vat_on_sales)`.
    pub vat_refundable: Decimal,
    /// `vat_on_sales - vat_on_purchases`; negative when refundable.
    pub net_vat: Decimal,
    /// When the VAT falls due.
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: VatReportStatus,
    /// Journal entries synthesized for this report.
    pub entry_ids: Vec<EntryId>,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}
