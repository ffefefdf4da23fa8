//! VAT calculation and period netting.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tavolo_shared::types::{round_amount, EntryId, StoreId, UserId, VatReportId};
use tavolo_shared::LedgerConfig;

use super::error::TaxError;
use super::rates::VatRateCategory;
use super::types::{LineVat, VatReport, VatReportStatus};
use crate::accounts::error::ChartError;
use crate::accounts::store::ChartStore;
use crate::accounts::types::{AccountCategory, ChartOfAccounts};
use crate::balances::period::Period;
use crate::journal::store::Journal;
use crate::journal::types::{JournalCode, JournalLine, NewEntry, NewLine};

/// Computes VAT on a taxable base.
///
/// Pure: the result depends only on the amount and category, never on
/// calculation order.
#[must_use]
pub fn calculate_line_vat(amount: Decimal, category: VatRateCategory) -> LineVat {
    let rate = category.rate();
    let vat_amount = round_amount(amount * rate / Decimal::ONE_HUNDRED);
    LineVat {
        base: amount,
        rate,
        vat_amount,
        total: amount + vat_amount,
    }
}

/// Splits a VAT-inclusive total into base and VAT.
#[must_use]
pub fn extract_from_total(total: Decimal, category: VatRateCategory) -> LineVat {
    let rate = category.rate();
    let divisor = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
    let base = round_amount(total / divisor);
    LineVat {
        base,
        rate,
        vat_amount: total - base,
        total,
    }
}

/// Period VAT computation and settlement synthesis.
pub struct TaxService<'a> {
    config: &'a LedgerConfig,
    charts: &'a ChartStore,
    journal: &'a Journal,
    /// Author stamped on synthesized entries.
    author: UserId,
}

impl<'a> TaxService<'a> {
    /// Creates a tax service recording entries as the given author.
    #[must_use]
    pub const fn new(
        config: &'a LedgerConfig,
        charts: &'a ChartStore,
        journal: &'a Journal,
        author: UserId,
    ) -> Self {
        Self {
            config,
            charts,
            journal,
            author,
        }
    }

    /// Computes the period VAT report and synthesizes its entries.
    ///
    /// Figures are derived from posted lines outside the tax journal,
    /// so regenerating a draft report always reproduces the same
    /// numbers. Synthesized entries move VAT collected and deductible
    /// onto the VAT-due account and carry a refundable balance to the
    /// VAT-credit account; paying the due balance is the payment
    /// subsystem's business.
    ///
    /// # Errors
    ///
    /// Surfaces the underlying chart or ledger error verbatim.
    pub fn period_vat(&self, store_id: StoreId, period: Period) -> Result<VatReport, TaxError> {
        let chart = self.charts.require_chart(store_id)?;

        // Snapshot the period's non-tax lines once.
        let entries = self.journal.entries_for_store(store_id);
        let lines: Vec<JournalLine> = entries
            .iter()
            .filter(|e| e.status.is_posted() && e.journal_code != JournalCode::Tax)
            .flat_map(|e| e.lines.iter().cloned())
            .filter(|l| period.contains(l.date))
            .collect();

        let taxable_sales = sum_credit_normal(&chart, &lines, is_revenue);
        let taxable_purchases = sum_debit_normal(&chart, &lines, is_taxable_purchase);
        let vat_on_sales = sum_credit_normal(&chart, &lines, |c| {
            matches!(c, AccountCategory::VatCollected)
        });
        let vat_on_purchases = sum_debit_normal(&chart, &lines, |c| {
            matches!(c, AccountCategory::VatDeductible)
        });

        let net_vat = vat_on_sales - vat_on_purchases;
        let vat_payable = net_vat.max(Decimal::ZERO);
        let vat_refundable = (-net_vat).max(Decimal::ZERO);

        let entry_ids =
            self.synthesize_entries(&chart, period, vat_on_sales, vat_on_purchases, net_vat)?;

        let report = VatReport {
            id: VatReportId::new(),
            store_id,
            period,
            taxable_sales,
            taxable_purchases,
            vat_on_sales,
            vat_on_purchases,
            vat_payable,
            vat_refundable,
            net_vat,
            due_date: due_date_after(period.end, self.config.vat_due_day),
            status: VatReportStatus::Draft,
            entry_ids,
            generated_at: Utc::now(),
        };
        tracing::info!(
            %store_id,
            net_vat = %report.net_vat,
            due = %report.due_date,
            "period VAT computed"
        );
        Ok(report)
    }

    /// Posts the collected/deductible/settlement entries in the tax
    /// journal, skipping any with a zero amount.
    fn synthesize_entries(
        &self,
        chart: &ChartOfAccounts,
        period: Period,
        vat_on_sales: Decimal,
        vat_on_purchases: Decimal,
        net_vat: Decimal,
    ) -> Result<Vec<EntryId>, TaxError> {
        let collected = self.account_code(chart, AccountCategory::VatCollected)?;
        let deductible = self.account_code(chart, AccountCategory::VatDeductible)?;
        let due = self.account_code(chart, AccountCategory::VatDue)?;
        let credit_carry = self.account_code(chart, AccountCategory::VatCredit)?;

        let mut planned: Vec<(String, Vec<NewLine>)> = Vec::new();
        if vat_on_sales > Decimal::ZERO {
            planned.push((
                "VAT collected for the period".to_string(),
                vec![
                    NewLine::debit(&collected, vat_on_sales, "Clear VAT collected"),
                    NewLine::credit(&due, vat_on_sales, "VAT due"),
                ],
            ));
        }
        if vat_on_purchases > Decimal::ZERO {
            planned.push((
                "VAT deductible for the period".to_string(),
                vec![
                    NewLine::debit(&due, vat_on_purchases, "Offset VAT due"),
                    NewLine::credit(&deductible, vat_on_purchases, "Clear VAT deductible"),
                ],
            ));
        }
        if net_vat < Decimal::ZERO {
            let carry = -net_vat;
            planned.push((
                "VAT credit carried forward".to_string(),
                vec![
                    NewLine::debit(&credit_carry, carry, "VAT credit"),
                    NewLine::credit(&due, carry, "Clear refundable balance"),
                ],
            ));
        }

        let mut entry_ids = Vec::with_capacity(planned.len());
        for (description, lines) in planned {
            let entry_id = self.journal.create_entry(NewEntry {
                store_id: chart.store_id,
                journal_code: JournalCode::Tax,
                date: period.end,
                description,
                author: self.author,
            })?;
            if let Err(err) = self.journal.add_lines(entry_id, lines) {
                let _ = self.journal.discard_draft(entry_id);
                return Err(err.into());
            }
            entry_ids.push(entry_id);
        }
        Ok(entry_ids)
    }

    fn account_code(
        &self,
        chart: &ChartOfAccounts,
        category: AccountCategory,
    ) -> Result<String, TaxError> {
        let account = chart
            .account_for_category(category)
            .ok_or(ChartError::CategoryNotFound {
                store_id: chart.store_id,
                category,
            })?;
        Ok(account.code.clone())
    }

}

fn sum_credit_normal<F>(chart: &ChartOfAccounts, lines: &[JournalLine], matches: F) -> Decimal
where
    F: Fn(AccountCategory) -> bool,
{
    sum_by(chart, lines, matches, |l| l.credit - l.debit)
}

fn sum_debit_normal<F>(chart: &ChartOfAccounts, lines: &[JournalLine], matches: F) -> Decimal
where
    F: Fn(AccountCategory) -> bool,
{
    sum_by(chart, lines, matches, |l| l.debit - l.credit)
}

fn sum_by<F, G>(chart: &ChartOfAccounts, lines: &[JournalLine], matches: F, amount: G) -> Decimal
where
    F: Fn(AccountCategory) -> bool,
    G: Fn(&JournalLine) -> Decimal,
{
    lines
        .iter()
        .filter(|l| {
            chart
                .account(&l.account_code)
                .is_some_and(|a| matches(a.category))
        })
        .map(amount)
        .sum()
}

fn is_revenue(category: AccountCategory) -> bool {
    matches!(
        category,
        AccountCategory::Sales | AccountCategory::ServiceRevenue
    )
}

/// Wages and social charges carry no VAT; only supplier-invoiced
/// expense categories count as taxable purchases.
fn is_taxable_purchase(category: AccountCategory) -> bool {
    matches!(
        category,
        AccountCategory::Purchases | AccountCategory::ExternalServices
    )
}

/// The VAT due date: the configured day of the month following the
/// period end.
fn due_date_after(period_end: NaiveDate, due_day: u32) -> NaiveDate {
    let (year, month) = if period_end.month() == 12 {
        (period_end.year() + 1, 1)
    } else {
        (period_end.year(), period_end.month() + 1)
    };
    // Config validation caps the day at 28, but clamp anyway so a
    // hand-built config cannot produce an invalid date.
    NaiveDate::from_ymd_opt(year, month, due_day.min(28)).unwrap_or(period_end)
}
