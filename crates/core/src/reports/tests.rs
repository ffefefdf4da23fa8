//! Report generation tests.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tavolo_shared::types::{StoreId, UserId};
use tavolo_shared::LedgerConfig;

use super::error::ReportError;
use super::service::ReportService;
use super::types::{FinancialStatement, StatementType};
use crate::accounts::error::ChartError;
use crate::accounts::store::ChartStore;
use crate::balances::period::Period;
use crate::journal::store::Journal;
use crate::journal::types::{JournalCode, NewEntry, NewLine};

struct Fixture {
    config: Arc<LedgerConfig>,
    charts: Arc<ChartStore>,
    journal: Journal,
    store_id: StoreId,
}

impl Fixture {
    fn new() -> Self {
        let config = Arc::new(LedgerConfig::default());
        let charts = Arc::new(ChartStore::new(&config));
        let store_id = StoreId::new();
        charts.create_chart(store_id, "Bistro Nord").unwrap();
        let journal = Journal::new(Arc::clone(&config), Arc::clone(&charts));
        Self {
            config,
            charts,
            journal,
            store_id,
        }
    }

    fn reports(&self) -> ReportService<'_> {
        ReportService::new(&self.config, &self.charts, &self.journal)
    }

    fn post(&self, date: NaiveDate, description: &str, lines: Vec<NewLine>) {
        let id = self
            .journal
            .create_entry(NewEntry {
                store_id: self.store_id,
                journal_code: JournalCode::General,
                date,
                description: description.to_string(),
                author: UserId::new(),
            })
            .unwrap();
        self.journal.add_lines(id, lines).unwrap();
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Seeds a month of simple activity: capital, sales with VAT, rent.
fn seeded() -> Fixture {
    let fixture = Fixture::new();
    fixture.post(
        date(2026, 3, 1),
        "Capital injection",
        vec![
            NewLine::debit("512", dec!(5000), "Deposit"),
            NewLine::credit("101", dec!(5000), "Capital"),
        ],
    );
    fixture.post(
        date(2026, 3, 10),
        "Day takings",
        vec![
            NewLine::debit("53", dec!(1200), "Cash"),
            NewLine::credit("707", dec!(1000), "Meal sales"),
            NewLine::credit("4457", dec!(200), "VAT collected"),
        ],
    );
    fixture.post(
        date(2026, 3, 15),
        "Rent for March",
        vec![
            NewLine::debit("613", dec!(700), "Rent"),
            NewLine::credit("512", dec!(700), "Bank transfer"),
        ],
    );
    fixture
}

// ========================================================================
// Trial balance
// ========================================================================

#[test]
fn test_trial_balance_closes_for_balanced_books() {
    let fixture = seeded();
    let period = Period::month(2026, 3).unwrap();

    let tb = fixture.reports().trial_balance(fixture.store_id, period).unwrap();

    assert!(tb.totals.is_balanced);
    assert_eq!(tb.totals.closing_debit, tb.totals.closing_credit);
    // Every postable account is listed, activity or not.
    let chart = fixture.charts.get_chart(fixture.store_id).unwrap();
    assert_eq!(tb.rows.len(), chart.postable_accounts().count());
}

#[test]
fn test_trial_balance_splits_columns_by_sign() {
    let fixture = seeded();
    let period = Period::month(2026, 3).unwrap();

    let tb = fixture.reports().trial_balance(fixture.store_id, period).unwrap();

    let bank = tb.rows.iter().find(|r| r.account_code == "512").unwrap();
    assert_eq!(bank.closing_debit, dec!(4300)); // 5000 - 700
    assert_eq!(bank.closing_credit, dec!(0));

    let sales = tb.rows.iter().find(|r| r.account_code == "707").unwrap();
    assert_eq!(sales.closing_debit, dec!(0));
    assert_eq!(sales.closing_credit, dec!(1000));
}

#[test]
fn test_trial_balance_opening_carries_forward() {
    let fixture = seeded();
    let april = Period::month(2026, 4).unwrap();

    let tb = fixture.reports().trial_balance(fixture.store_id, april).unwrap();

    let cash = tb.rows.iter().find(|r| r.account_code == "53").unwrap();
    assert_eq!(cash.opening_debit, dec!(1200));
    assert_eq!(cash.period_debit, dec!(0));
    assert_eq!(cash.closing_debit, dec!(1200));
    assert!(tb.totals.is_balanced);
}

#[test]
fn test_trial_balance_unknown_store_surfaces_error() {
    let fixture = Fixture::new();
    let result = fixture
        .reports()
        .trial_balance(StoreId::new(), Period::month(2026, 3).unwrap());

    assert!(matches!(
        result,
        Err(ReportError::Chart(ChartError::ChartNotFound(_)))
    ));
}

// ========================================================================
// Income statement
// ========================================================================

#[test]
fn test_income_statement_net_result_and_margin() {
    let fixture = seeded();
    let period = Period::month(2026, 3).unwrap();

    let stmt = fixture
        .reports()
        .income_statement(fixture.store_id, period)
        .unwrap();

    // Revenue 1000, expenses 700 -> net 300, margin 30%.
    assert_eq!(stmt.revenue.total, dec!(1000));
    assert_eq!(stmt.expenses.total, dec!(700));
    assert_eq!(stmt.net_result, dec!(300));
    assert_eq!(stmt.gross_margin, dec!(30.00));
}

#[test]
fn test_income_statement_zero_revenue_margin_is_zero() {
    let fixture = Fixture::new();
    fixture.post(
        date(2026, 3, 15),
        "Rent with no sales",
        vec![
            NewLine::debit("613", dec!(700), "Rent"),
            NewLine::credit("512", dec!(700), "Bank transfer"),
        ],
    );

    let stmt = fixture
        .reports()
        .income_statement(fixture.store_id, Period::month(2026, 3).unwrap())
        .unwrap();

    assert_eq!(stmt.revenue.total, dec!(0));
    assert_eq!(stmt.net_result, dec!(-700));
    assert_eq!(stmt.gross_margin, dec!(0));
}

#[test]
fn test_income_statement_scoped_to_period() {
    let fixture = seeded();

    let april = fixture
        .reports()
        .income_statement(fixture.store_id, Period::month(2026, 4).unwrap())
        .unwrap();

    assert_eq!(april.revenue.total, dec!(0));
    assert_eq!(april.expenses.total, dec!(0));
    assert_eq!(april.net_result, dec!(0));
}

// ========================================================================
// Balance sheet
// ========================================================================

#[test]
fn test_balance_sheet_closes() {
    let fixture = seeded();
    let period = Period::month(2026, 3).unwrap();

    let sheet = fixture
        .reports()
        .balance_sheet(fixture.store_id, period)
        .unwrap();

    // Assets: bank 4300 + cash 1200 = 5500.
    assert_eq!(sheet.total_assets, dec!(5500));
    // Liabilities: VAT collected 200. Equity: capital 5000 + result 300.
    assert_eq!(sheet.liabilities.total, dec!(200));
    assert_eq!(sheet.equity.total, dec!(5300));
    assert_eq!(sheet.liabilities_and_equity, dec!(5500));
    assert!(sheet.is_balanced);
}

#[test]
fn test_balance_sheet_includes_period_result_row() {
    let fixture = seeded();
    let sheet = fixture
        .reports()
        .balance_sheet(fixture.store_id, Period::month(2026, 3).unwrap())
        .unwrap();

    let result = sheet.equity.rows.iter().find(|r| r.account_code == "120").unwrap();
    assert_eq!(result.amount, dec!(300));
}

// ========================================================================
// Statement dispatch
// ========================================================================

#[test]
fn test_generate_financial_statement_dispatch() {
    let fixture = seeded();
    let period = Period::month(2026, 3).unwrap();
    let reports = fixture.reports();

    let sheet = reports
        .generate_financial_statement(StatementType::BalanceSheet, fixture.store_id, period)
        .unwrap();
    assert!(matches!(sheet, FinancialStatement::BalanceSheet(_)));

    let income = reports
        .generate_financial_statement(StatementType::IncomeStatement, fixture.store_id, period)
        .unwrap();
    assert!(matches!(income, FinancialStatement::IncomeStatement(_)));
}
