//! The ledger facade.
//!
//! One `Ledger` is constructed per process (or per test) and passed to
//! callers explicitly; there is no global instance. It wires the chart
//! store, the journal engine, and the derivation services behind the
//! read/write API the rest of the platform consumes.

use std::sync::Arc;

use tavolo_shared::types::{EntryId, StoreId, UserId};
use tavolo_shared::LedgerConfig;

use crate::accounts::error::ChartError;
use crate::accounts::store::ChartStore;
use crate::accounts::types::ChartOfAccounts;
use crate::balances::aggregator::{AccountPeriodBalance, BalanceAggregator, GeneralLedgerLine};
use crate::balances::period::Period;
use crate::journal::error::LedgerError;
use crate::journal::store::Journal;
use crate::journal::types::{JournalEntry, NewEntry, NewLine};
use crate::posting::rules::PostingService;
use crate::posting::types::{OrderCompleted, PaymentSettled};
use crate::reports::error::ReportError;
use crate::reports::service::ReportService;
use crate::reports::types::{FinancialStatement, StatementType, TrialBalance};
use crate::tax::calculator::TaxService;
use crate::tax::error::TaxError;
use crate::tax::types::VatReport;

/// The accounting subsystem for all stores of one deployment.
pub struct Ledger {
    config: Arc<LedgerConfig>,
    charts: Arc<ChartStore>,
    journal: Journal,
    /// Author stamped on auto-generated postings.
    system_author: UserId,
}

impl Ledger {
    /// Creates a ledger with the given configuration.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        let config = Arc::new(config);
        let charts = Arc::new(ChartStore::new(&config));
        let journal = Journal::new(Arc::clone(&config), Arc::clone(&charts));
        Self {
            config,
            charts,
            journal,
            system_author: UserId::new(),
        }
    }

    /// Overrides the author stamped on auto-generated postings.
    #[must_use]
    pub fn with_system_author(mut self, author: UserId) -> Self {
        self.system_author = author;
        self
    }

    // ========== Chart of accounts ==========

    /// Creates a store's chart, seeded from the reference plan.
    ///
    /// # Errors
    ///
    /// See [`ChartStore::create_chart`].
    pub fn create_chart(
        &self,
        store_id: StoreId,
        name: &str,
    ) -> Result<Arc<ChartOfAccounts>, ChartError> {
        self.charts.create_chart(store_id, name)
    }

    /// Returns a store's chart; `None` if the store is not onboarded.
    #[must_use]
    pub fn get_chart(&self, store_id: StoreId) -> Option<Arc<ChartOfAccounts>> {
        self.charts.get_chart(store_id)
    }

    /// Soft-deactivates an account.
    ///
    /// # Errors
    ///
    /// See [`ChartStore::deactivate_account`].
    pub fn deactivate_account(&self, store_id: StoreId, code: &str) -> Result<(), ChartError> {
        self.charts.deactivate_account(store_id, code)
    }

    // ========== Journal ==========

    /// Creates a draft journal entry.
    ///
    /// # Errors
    ///
    /// See [`Journal::create_entry`].
    pub fn create_entry(&self, input: NewEntry) -> Result<EntryId, LedgerError> {
        self.journal.create_entry(input)
    }

    /// Attaches balanced lines to a draft entry, posting it.
    ///
    /// # Errors
    ///
    /// See [`Journal::add_lines`].
    pub fn add_lines(&self, entry_id: EntryId, lines: Vec<NewLine>) -> Result<(), LedgerError> {
        self.journal.add_lines(entry_id, lines)
    }

    /// Creates a reversing entry for a posted entry.
    ///
    /// # Errors
    ///
    /// See [`Journal::reverse_entry`].
    pub fn reverse_entry(&self, entry_id: EntryId) -> Result<EntryId, LedgerError> {
        self.journal.reverse_entry(entry_id)
    }

    /// Returns a snapshot of an entry.
    #[must_use]
    pub fn get_entry(&self, entry_id: EntryId) -> Option<JournalEntry> {
        self.journal.get_entry(entry_id)
    }

    // ========== Posting rules ==========

    /// Posts the sales entry for a completed order.
    ///
    /// # Errors
    ///
    /// See [`PostingService::post_order_completed`].
    pub fn post_order_completed(&self, event: &OrderCompleted) -> Result<EntryId, LedgerError> {
        self.posting().post_order_completed(event)
    }

    /// Posts the settlement entry for a paid order.
    ///
    /// # Errors
    ///
    /// See [`PostingService::post_payment_settled`].
    pub fn post_payment_settled(&self, event: &PaymentSettled) -> Result<EntryId, LedgerError> {
        self.posting().post_payment_settled(event)
    }

    /// Reverses the sales entry of a cancelled order.
    ///
    /// # Errors
    ///
    /// See [`PostingService::post_order_cancelled`].
    pub fn post_order_cancelled(&self, sales_entry: EntryId) -> Result<EntryId, LedgerError> {
        self.posting().post_order_cancelled(sales_entry)
    }

    // ========== Reads ==========

    /// Opening/movement/closing figures for one account and period.
    #[must_use]
    pub fn account_balances(
        &self,
        store_id: StoreId,
        account_code: &str,
        period: Period,
    ) -> AccountPeriodBalance {
        BalanceAggregator::new(&self.journal).account_balances(store_id, account_code, period)
    }

    /// The account's general ledger for a range, with running balances.
    #[must_use]
    pub fn get_general_ledger(
        &self,
        store_id: StoreId,
        account_code: &str,
        range: Period,
    ) -> Vec<GeneralLedgerLine> {
        BalanceAggregator::new(&self.journal).general_ledger(store_id, account_code, range)
    }

    /// The trial balance for a store and period.
    ///
    /// # Errors
    ///
    /// See [`ReportService::trial_balance`].
    pub fn get_trial_balance(
        &self,
        store_id: StoreId,
        period: Period,
    ) -> Result<TrialBalance, ReportError> {
        self.reports().trial_balance(store_id, period)
    }

    /// Generates a financial statement.
    ///
    /// # Errors
    ///
    /// See [`ReportService::generate_financial_statement`].
    pub fn generate_financial_statement(
        &self,
        statement_type: StatementType,
        store_id: StoreId,
        period: Period,
    ) -> Result<FinancialStatement, ReportError> {
        self.reports()
            .generate_financial_statement(statement_type, store_id, period)
    }

    /// Computes the period VAT report, synthesizing its entries.
    ///
    /// # Errors
    ///
    /// See [`TaxService::period_vat`].
    pub fn calculate_vat(&self, store_id: StoreId, period: Period) -> Result<VatReport, TaxError> {
        TaxService::new(&self.config, &self.charts, &self.journal, self.system_author)
            .period_vat(store_id, period)
    }

    fn posting(&self) -> PostingService<'_> {
        PostingService::new(&self.charts, &self.journal, self.system_author)
    }

    fn reports(&self) -> ReportService<'_> {
        ReportService::new(&self.config, &self.charts, &self.journal)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tavolo_shared::types::OrderId;

    use crate::posting::types::PaymentMethod;
    use crate::reports::types::StatementType;

    /// End-to-end: onboard, sell, settle, report.
    #[test]
    fn test_order_to_statements_flow() {
        let ledger = Ledger::default();
        let store_id = StoreId::new();
        ledger.create_chart(store_id, "Bistro Nord").unwrap();

        let order_id = OrderId::new();
        let timestamp = Utc.with_ymd_and_hms(2026, 3, 10, 12, 30, 0).unwrap();
        ledger
            .post_order_completed(&OrderCompleted {
                order_id,
                store_id,
                total_amount: dec!(121),
                tax_amount: dec!(21),
                payment_method: PaymentMethod::Cash,
                timestamp,
            })
            .unwrap();
        ledger
            .post_payment_settled(&PaymentSettled {
                order_id,
                store_id,
                amount: dec!(121),
                method: PaymentMethod::Cash,
                timestamp,
            })
            .unwrap();

        let period = Period::month(2026, 3).unwrap();

        let receivable = ledger.account_balances(store_id, "411", period);
        assert_eq!(receivable.closing, dec!(0));

        let tb = ledger.get_trial_balance(store_id, period).unwrap();
        assert!(tb.totals.is_balanced);

        let FinancialStatement::IncomeStatement(income) = ledger
            .generate_financial_statement(StatementType::IncomeStatement, store_id, period)
            .unwrap()
        else {
            panic!("expected income statement");
        };
        assert_eq!(income.revenue.total, dec!(100));

        let vat = ledger.calculate_vat(store_id, period).unwrap();
        assert_eq!(vat.vat_payable, dec!(21));

        // Tax settlement entries keep the books balanced.
        let tb = ledger.get_trial_balance(store_id, period).unwrap();
        assert!(tb.totals.is_balanced);
    }

    #[test]
    fn test_isolated_instances_share_nothing() {
        let a = Ledger::default();
        let b = Ledger::default();
        let store_id = StoreId::new();

        a.create_chart(store_id, "Bistro Nord").unwrap();
        assert!(a.get_chart(store_id).is_some());
        assert!(b.get_chart(store_id).is_none());
    }

    #[test]
    fn test_general_ledger_read() {
        let ledger = Ledger::default();
        let store_id = StoreId::new();
        ledger.create_chart(store_id, "Bistro Nord").unwrap();

        let timestamp = Utc.with_ymd_and_hms(2026, 3, 10, 12, 30, 0).unwrap();
        ledger
            .post_order_completed(&OrderCompleted {
                order_id: OrderId::new(),
                store_id,
                total_amount: dec!(60),
                tax_amount: dec!(10),
                payment_method: PaymentMethod::Bank,
                timestamp,
            })
            .unwrap();

        let rows = ledger.get_general_ledger(store_id, "411", Period::month(2026, 3).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].debit, dec!(60));
        assert_eq!(rows[0].running_balance, dec!(60));
    }
}
