//! Balance derivation over posted journal lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tavolo_shared::types::{EntryId, StoreId};

use super::period::Period;
use crate::journal::store::Journal;
use crate::journal::types::JournalCode;

/// Opening, movement, and closing figures for one account and period.
///
/// Amounts are signed nets (debit - credit): positive means a debit
/// balance regardless of account type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountPeriodBalance {
    /// The account code.
    pub account_code: String,
    /// Balance carried in from everything before the period; zero for
    /// the account's first period.
    pub opening: Decimal,
    /// Net of all line debits minus credits dated within the period.
    pub period_movement: Decimal,
    /// `opening + period_movement`.
    pub closing: Decimal,
}

/// One general-ledger row: a line with its entry context and the
/// running balance after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerLine {
    /// The entry this line belongs to.
    pub entry_id: EntryId,
    /// The entry's number.
    pub entry_number: String,
    /// The journal the entry is recorded in.
    pub journal_code: JournalCode,
    /// Accounting date.
    pub date: chrono::NaiveDate,
    /// Line description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Signed balance after this line, starting from the range's
    /// opening balance.
    pub running_balance: Decimal,
}

/// Derives balances from the journal.
///
/// Every call takes a snapshot of the posted lines, so reads tolerate a
/// ledger that is being appended to concurrently.
pub struct BalanceAggregator<'a> {
    journal: &'a Journal,
}

impl<'a> BalanceAggregator<'a> {
    /// Creates an aggregator over the given journal.
    #[must_use]
    pub const fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    /// Computes opening/movement/closing for one account and period.
    #[must_use]
    pub fn account_balances(
        &self,
        store_id: StoreId,
        account_code: &str,
        period: Period,
    ) -> AccountPeriodBalance {
        let lines = self.journal.posted_lines(store_id);

        let mut opening = Decimal::ZERO;
        let mut period_movement = Decimal::ZERO;
        for line in lines.iter().filter(|l| l.account_code == account_code) {
            if line.date < period.start {
                opening += line.signed_amount();
            } else if period.contains(line.date) {
                period_movement += line.signed_amount();
            }
        }

        AccountPeriodBalance {
            account_code: account_code.to_string(),
            opening,
            period_movement,
            closing: opening + period_movement,
        }
    }

    /// Returns the account's general ledger for a range, in date order,
    /// with a running balance seeded from the range's opening balance.
    #[must_use]
    pub fn general_ledger(
        &self,
        store_id: StoreId,
        account_code: &str,
        range: Period,
    ) -> Vec<GeneralLedgerLine> {
        let entries = self.journal.entries_for_store(store_id);

        let mut opening = Decimal::ZERO;
        let mut rows: Vec<(String, GeneralLedgerLine)> = Vec::new();

        for entry in entries.iter().filter(|e| e.status.is_posted()) {
            for line in entry.lines.iter().filter(|l| l.account_code == account_code) {
                if line.date < range.start {
                    opening += line.signed_amount();
                } else if range.contains(line.date) {
                    rows.push((
                        entry.entry_number.clone(),
                        GeneralLedgerLine {
                            entry_id: entry.id,
                            entry_number: entry.entry_number.clone(),
                            journal_code: entry.journal_code,
                            date: line.date,
                            description: line.description.clone(),
                            debit: line.debit,
                            credit: line.credit,
                            running_balance: Decimal::ZERO,
                        },
                    ));
                }
            }
        }

        rows.sort_by(|a, b| (a.1.date, &a.0).cmp(&(b.1.date, &b.0)));

        let mut balance = opening;
        rows.into_iter()
            .map(|(_, mut row)| {
                balance += row.debit - row.credit;
                row.running_balance = balance;
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tavolo_shared::types::UserId;
    use tavolo_shared::LedgerConfig;

    use crate::accounts::store::ChartStore;
    use crate::journal::types::{NewEntry, NewLine};

    fn setup() -> (Journal, StoreId) {
        let config = Arc::new(LedgerConfig::default());
        let charts = Arc::new(ChartStore::new(&config));
        let store_id = StoreId::new();
        charts.create_chart(store_id, "Bistro Nord").unwrap();
        (Journal::new(config, charts), store_id)
    }

    fn post(journal: &Journal, store_id: StoreId, date: NaiveDate, lines: Vec<NewLine>) {
        let id = journal
            .create_entry(NewEntry {
                store_id,
                journal_code: JournalCode::General,
                date,
                description: "Test entry".to_string(),
                author: UserId::new(),
            })
            .unwrap();
        journal.add_lines(id, lines).unwrap();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_period_opens_at_zero() {
        let (journal, store_id) = setup();
        post(
            &journal,
            store_id,
            date(2026, 1, 10),
            vec![
                NewLine::debit("512", dec!(500), "Deposit"),
                NewLine::credit("101", dec!(500), "Capital"),
            ],
        );

        let aggregator = BalanceAggregator::new(&journal);
        let balance =
            aggregator.account_balances(store_id, "512", Period::month(2026, 1).unwrap());

        assert_eq!(balance.opening, dec!(0));
        assert_eq!(balance.period_movement, dec!(500));
        assert_eq!(balance.closing, dec!(500));
    }

    #[test]
    fn test_opening_is_prior_closing() {
        let (journal, store_id) = setup();
        post(
            &journal,
            store_id,
            date(2026, 1, 10),
            vec![
                NewLine::debit("512", dec!(500), "Deposit"),
                NewLine::credit("101", dec!(500), "Capital"),
            ],
        );
        post(
            &journal,
            store_id,
            date(2026, 2, 5),
            vec![
                NewLine::debit("613", dec!(200), "Rent"),
                NewLine::credit("512", dec!(200), "Rent paid"),
            ],
        );

        let aggregator = BalanceAggregator::new(&journal);
        let january = aggregator.account_balances(store_id, "512", Period::month(2026, 1).unwrap());
        let february = aggregator.account_balances(store_id, "512", Period::month(2026, 2).unwrap());

        assert_eq!(february.opening, january.closing);
        assert_eq!(february.period_movement, dec!(-200));
        assert_eq!(february.closing, dec!(300));
    }

    #[test]
    fn test_reversal_nets_to_zero() {
        let (journal, store_id) = setup();
        let id = journal
            .create_entry(NewEntry {
                store_id,
                journal_code: JournalCode::Sales,
                date: date(2026, 3, 4),
                description: "Sale".to_string(),
                author: UserId::new(),
            })
            .unwrap();
        journal
            .add_lines(
                id,
                vec![
                    NewLine::debit("411", dec!(121), "Order"),
                    NewLine::credit("707", dec!(121), "Sales"),
                ],
            )
            .unwrap();
        journal.reverse_entry(id).unwrap();

        let aggregator = BalanceAggregator::new(&journal);
        let balance =
            aggregator.account_balances(store_id, "411", Period::month(2026, 3).unwrap());

        assert_eq!(balance.closing, dec!(0));
    }

    #[test]
    fn test_unknown_account_is_zero_activity() {
        let (journal, store_id) = setup();
        let aggregator = BalanceAggregator::new(&journal);
        let balance =
            aggregator.account_balances(store_id, "512", Period::month(2026, 1).unwrap());

        assert_eq!(balance.opening, dec!(0));
        assert_eq!(balance.closing, dec!(0));
    }

    #[test]
    fn test_general_ledger_running_balance() {
        let (journal, store_id) = setup();
        post(
            &journal,
            store_id,
            date(2026, 1, 10),
            vec![
                NewLine::debit("512", dec!(500), "Deposit"),
                NewLine::credit("101", dec!(500), "Capital"),
            ],
        );
        post(
            &journal,
            store_id,
            date(2026, 2, 5),
            vec![
                NewLine::debit("613", dec!(200), "Rent"),
                NewLine::credit("512", dec!(200), "Rent paid"),
            ],
        );
        post(
            &journal,
            store_id,
            date(2026, 2, 20),
            vec![
                NewLine::debit("512", dec!(300), "Takings"),
                NewLine::credit("707", dec!(300), "Sales"),
            ],
        );

        let aggregator = BalanceAggregator::new(&journal);
        let ledger = aggregator.general_ledger(store_id, "512", Period::month(2026, 2).unwrap());

        // January activity feeds the opening balance, not the rows.
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].running_balance, dec!(300)); // 500 - 200
        assert_eq!(ledger[1].running_balance, dec!(600)); // + 300
        assert!(ledger[0].date <= ledger[1].date);
    }
}
