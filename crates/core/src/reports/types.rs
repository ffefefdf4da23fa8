//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tavolo_shared::types::StoreId;

use crate::accounts::types::AccountType;
use crate::balances::period::Period;

/// Which financial statement to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementType {
    /// Assets versus liabilities and equity at period end.
    BalanceSheet,
    /// Revenue and expenses over the period.
    IncomeStatement,
}

/// Trial balance row for one postable account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Opening balance, debit column.
    pub opening_debit: Decimal,
    /// Opening balance, credit column.
    pub opening_credit: Decimal,
    /// Period movement, debit column.
    pub period_debit: Decimal,
    /// Period movement, credit column.
    pub period_credit: Decimal,
    /// Closing balance, debit column.
    pub closing_debit: Decimal,
    /// Closing balance, credit column.
    pub closing_credit: Decimal,
}

/// Trial balance column totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of the opening debit column.
    pub opening_debit: Decimal,
    /// Sum of the opening credit column.
    pub opening_credit: Decimal,
    /// Sum of the period debit column.
    pub period_debit: Decimal,
    /// Sum of the period credit column.
    pub period_credit: Decimal,
    /// Sum of the closing debit column.
    pub closing_debit: Decimal,
    /// Sum of the closing credit column.
    pub closing_credit: Decimal,
    /// Whether closing debits equal closing credits within tolerance.
    pub is_balanced: bool,
}

/// A re-computable trial balance snapshot for one store and period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    /// The store.
    pub store_id: StoreId,
    /// The period covered.
    pub period: Period,
    /// One row per postable account.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals and the balance check.
    pub totals: TrialBalanceTotals,
}

/// One statement line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRow {
    /// Account code ("120" for the derived period result).
    pub account_code: String,
    /// Account name.
    pub name: String,
    /// Amount, positive in the account's normal direction.
    pub amount: Decimal,
}

/// Income statement section (revenue or expenses).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatementSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts with activity in this section.
    pub rows: Vec<StatementRow>,
}

/// Income statement for one store and period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// The store.
    pub store_id: StoreId,
    /// The period covered.
    pub period: Period,
    /// Revenue section.
    pub revenue: IncomeStatementSection,
    /// Expense section.
    pub expenses: IncomeStatementSection,
    /// `total revenue - total expenses`.
    pub net_result: Decimal,
    /// `net_result / total revenue * 100`; zero when revenue is zero.
    pub gross_margin: Decimal,
}

/// Balance sheet section (assets, liabilities, equity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts with a closing balance in this section.
    pub rows: Vec<StatementRow>,
}

/// Balance sheet for one store as of the period end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// The store.
    pub store_id: StoreId,
    /// The period whose end the sheet is drawn at.
    pub period: Period,
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section.
    pub liabilities: BalanceSheetSection,
    /// Equity section, including the derived period result.
    pub equity: BalanceSheetSection,
    /// Total assets.
    pub total_assets: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity within tolerance.
    pub is_balanced: bool,
}

/// A generated financial statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FinancialStatement {
    /// A balance sheet.
    BalanceSheet(BalanceSheet),
    /// An income statement.
    IncomeStatement(IncomeStatement),
}
