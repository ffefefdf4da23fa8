//! Report generation.

use rust_decimal::Decimal;
use tavolo_shared::types::{round_amount, within_tolerance, StoreId};
use tavolo_shared::LedgerConfig;

use super::error::ReportError;
use super::types::{
    BalanceSheet, BalanceSheetSection, FinancialStatement, IncomeStatement,
    IncomeStatementSection, StatementRow, StatementType, TrialBalance, TrialBalanceRow,
    TrialBalanceTotals,
};
use crate::accounts::store::ChartStore;
use crate::accounts::types::AccountType;
use crate::balances::aggregator::BalanceAggregator;
use crate::balances::period::Period;
use crate::journal::store::Journal;

/// Account code reported for the derived period result in equity.
const PERIOD_RESULT_CODE: &str = "120";

/// Splits a signed net into debit/credit columns.
fn split_columns(net: Decimal) -> (Decimal, Decimal) {
    if net >= Decimal::ZERO {
        (net, Decimal::ZERO)
    } else {
        (Decimal::ZERO, -net)
    }
}

/// Generates trial balances and financial statements for one store.
pub struct ReportService<'a> {
    config: &'a LedgerConfig,
    charts: &'a ChartStore,
    journal: &'a Journal,
}

impl<'a> ReportService<'a> {
    /// Creates a report service over the given stores.
    #[must_use]
    pub const fn new(config: &'a LedgerConfig, charts: &'a ChartStore, journal: &'a Journal) -> Self {
        Self {
            config,
            charts,
            journal,
        }
    }

    /// Generates the trial balance for a store and period.
    ///
    /// Every postable account appears, activity or not; signed nets are
    /// split into debit/credit columns and the closing columns are
    /// checked for equality.
    ///
    /// # Errors
    ///
    /// Surfaces the underlying chart error if the store is unknown.
    pub fn trial_balance(
        &self,
        store_id: StoreId,
        period: Period,
    ) -> Result<TrialBalance, ReportError> {
        let chart = self.charts.require_chart(store_id)?;
        let aggregator = BalanceAggregator::new(self.journal);

        let mut rows = Vec::new();
        let mut totals = TrialBalanceTotals {
            opening_debit: Decimal::ZERO,
            opening_credit: Decimal::ZERO,
            period_debit: Decimal::ZERO,
            period_credit: Decimal::ZERO,
            closing_debit: Decimal::ZERO,
            closing_credit: Decimal::ZERO,
            is_balanced: false,
        };

        for account in chart.postable_accounts() {
            let balance = aggregator.account_balances(store_id, &account.code, period);
            let (opening_debit, opening_credit) = split_columns(balance.opening);
            let (period_debit, period_credit) = split_columns(balance.period_movement);
            let (closing_debit, closing_credit) = split_columns(balance.closing);

            totals.opening_debit += opening_debit;
            totals.opening_credit += opening_credit;
            totals.period_debit += period_debit;
            totals.period_credit += period_credit;
            totals.closing_debit += closing_debit;
            totals.closing_credit += closing_credit;

            rows.push(TrialBalanceRow {
                account_code: account.code.clone(),
                name: account.name.clone(),
                account_type: account.account_type(),
                opening_debit,
                opening_credit,
                period_debit,
                period_credit,
                closing_debit,
                closing_credit,
            });
        }

        totals.is_balanced = within_tolerance(
            totals.closing_debit,
            totals.closing_credit,
            self.config.balance_tolerance,
        );

        Ok(TrialBalance {
            store_id,
            period,
            rows,
            totals,
        })
    }

    /// Generates the income statement for a store and period.
    ///
    /// # Errors
    ///
    /// Surfaces the underlying chart error if the store is unknown.
    pub fn income_statement(
        &self,
        store_id: StoreId,
        period: Period,
    ) -> Result<IncomeStatement, ReportError> {
        let chart = self.charts.require_chart(store_id)?;
        let aggregator = BalanceAggregator::new(self.journal);

        let mut revenue = IncomeStatementSection::default();
        let mut expenses = IncomeStatementSection::default();

        for account in chart.postable_accounts() {
            let account_type = account.account_type();
            let section = match account_type {
                AccountType::Revenue => &mut revenue,
                AccountType::Expense => &mut expenses,
                _ => continue,
            };

            let balance = aggregator.account_balances(store_id, &account.code, period);
            // Period movement in the account's normal direction.
            let amount = if account_type.is_debit_normal() {
                balance.period_movement
            } else {
                -balance.period_movement
            };
            if amount == Decimal::ZERO {
                continue;
            }

            section.total += amount;
            section.rows.push(StatementRow {
                account_code: account.code.clone(),
                name: account.name.clone(),
                amount,
            });
        }

        let net_result = revenue.total - expenses.total;
        let gross_margin = if revenue.total == Decimal::ZERO {
            Decimal::ZERO
        } else {
            round_amount(net_result / revenue.total * Decimal::ONE_HUNDRED)
        };

        Ok(IncomeStatement {
            store_id,
            period,
            revenue,
            expenses,
            net_result,
            gross_margin,
        })
    }

    /// Generates the balance sheet for a store at the period end.
    ///
    /// The period's net result is shown inside equity so the sheet
    /// closes without a year-end closing entry.
    ///
    /// # Errors
    ///
    /// Surfaces the underlying chart error if the store is unknown.
    pub fn balance_sheet(
        &self,
        store_id: StoreId,
        period: Period,
    ) -> Result<BalanceSheet, ReportError> {
        let chart = self.charts.require_chart(store_id)?;
        let aggregator = BalanceAggregator::new(self.journal);

        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();

        for account in chart.postable_accounts() {
            let account_type = account.account_type();
            let section = match account_type {
                AccountType::Asset => &mut assets,
                AccountType::Liability => &mut liabilities,
                AccountType::Equity => &mut equity,
                AccountType::Revenue | AccountType::Expense => continue,
            };

            let balance = aggregator.account_balances(store_id, &account.code, period);
            // Closing balance in the account's normal direction.
            let amount = if account_type.is_debit_normal() {
                balance.closing
            } else {
                -balance.closing
            };
            if amount == Decimal::ZERO {
                continue;
            }

            section.total += amount;
            section.rows.push(StatementRow {
                account_code: account.code.clone(),
                name: account.name.clone(),
                amount,
            });
        }

        // Revenue and expense accounts have not been closed to equity.
        // The sheet is drawn from cumulative closing balances, so the
        // result row must be cumulative too, up to the period end.
        let lifetime = Period::new(chrono::NaiveDate::MIN, period.end);
        let result = self.income_statement(store_id, lifetime)?;
        if result.net_result != Decimal::ZERO {
            equity.total += result.net_result;
            equity.rows.push(StatementRow {
                account_code: PERIOD_RESULT_CODE.to_string(),
                name: "Result for the period".to_string(),
                amount: result.net_result,
            });
        }

        let total_assets = assets.total;
        let liabilities_and_equity = liabilities.total + equity.total;

        Ok(BalanceSheet {
            store_id,
            period,
            assets,
            liabilities,
            equity,
            total_assets,
            liabilities_and_equity,
            is_balanced: within_tolerance(
                total_assets,
                liabilities_and_equity,
                self.config.balance_tolerance,
            ),
        })
    }

    /// Generates the requested statement.
    ///
    /// # Errors
    ///
    /// Surfaces the underlying chart error if the store is unknown.
    pub fn generate_financial_statement(
        &self,
        statement_type: StatementType,
        store_id: StoreId,
        period: Period,
    ) -> Result<FinancialStatement, ReportError> {
        match statement_type {
            StatementType::BalanceSheet => self
                .balance_sheet(store_id, period)
                .map(FinancialStatement::BalanceSheet),
            StatementType::IncomeStatement => self
                .income_statement(store_id, period)
                .map(FinancialStatement::IncomeStatement),
        }
    }
}
