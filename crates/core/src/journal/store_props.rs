//! Property tests for the journal engine.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tavolo_shared::types::{StoreId, UserId};
use tavolo_shared::LedgerConfig;

use super::error::LedgerError;
use super::store::Journal;
use super::types::{JournalCode, NewEntry, NewLine};
use crate::accounts::store::ChartStore;

fn setup() -> (Journal, StoreId) {
    let config = Arc::new(LedgerConfig::default());
    let charts = Arc::new(ChartStore::new(&config));
    let store_id = StoreId::new();
    charts.create_chart(store_id, "Prop store").unwrap();
    (Journal::new(config, charts), store_id)
}

fn header(store_id: StoreId) -> NewEntry {
    NewEntry {
        store_id,
        journal_code: JournalCode::General,
        date: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        description: "Property case".to_string(),
        author: UserId::new(),
    }
}

/// Strategy for positive amounts in cents (0.01 ..= 1_000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a balanced line set: each amount appears once as a
/// debit and once as a credit, on postable accounts.
fn balanced_lines_strategy() -> impl Strategy<Value = Vec<NewLine>> {
    prop::collection::vec(amount_strategy(), 1..=8).prop_map(|amounts| {
        let mut lines = Vec::with_capacity(amounts.len() * 2);
        for amount in amounts {
            lines.push(NewLine::debit("411", amount, "d"));
            lines.push(NewLine::credit("707", amount, "c"));
        }
        lines
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Balance invariant: balanced line sets are accepted**
    ///
    /// *For any* set of lines whose debits equal credits, `add_lines`
    /// SHALL post the entry.
    #[test]
    fn prop_balanced_sets_accepted(lines in balanced_lines_strategy()) {
        let (journal, store_id) = setup();
        let id = journal.create_entry(header(store_id)).unwrap();

        prop_assert!(journal.add_lines(id, lines).is_ok());
        let entry = journal.get_entry(id).unwrap();
        prop_assert!(entry.is_balanced(Decimal::new(1, 2)));
    }

    /// **Balance invariant: unbalanced line sets are rejected**
    ///
    /// *For any* balanced set skewed by more than the tolerance,
    /// `add_lines` SHALL reject the whole set and attach nothing.
    #[test]
    fn prop_unbalanced_sets_rejected(
        lines in balanced_lines_strategy(),
        skew_cents in 2i64..=100_000i64,
    ) {
        let (journal, store_id) = setup();
        let id = journal.create_entry(header(store_id)).unwrap();

        let mut lines = lines;
        lines.push(NewLine::debit("53", Decimal::new(skew_cents, 2), "skew"));

        let result = journal.add_lines(id, lines);
        let is_unbalanced = matches!(result, Err(LedgerError::Unbalanced { .. }));
        prop_assert!(is_unbalanced);
        prop_assert!(journal.get_entry(id).unwrap().lines.is_empty());
    }

    /// **Skew within tolerance is absorbed**
    ///
    /// *For any* balanced set skewed by at most the tolerance, the
    /// entry SHALL post (rounding absorption).
    #[test]
    fn prop_tolerance_absorbs_cent(lines in balanced_lines_strategy()) {
        let (journal, store_id) = setup();
        let id = journal.create_entry(header(store_id)).unwrap();

        let mut lines = lines;
        lines.push(NewLine::debit("53", Decimal::new(1, 2), "rounding"));

        prop_assert!(journal.add_lines(id, lines).is_ok());
    }

    /// **Reversal idempotence**
    ///
    /// *For any* posted entry, reversing its reversal SHALL reproduce
    /// the original lines (double negation).
    #[test]
    fn prop_double_reversal_restores_lines(lines in balanced_lines_strategy()) {
        let (journal, store_id) = setup();
        let id = journal.create_entry(header(store_id)).unwrap();
        journal.add_lines(id, lines).unwrap();

        let first = journal.reverse_entry(id).unwrap();
        let second = journal.reverse_entry(first).unwrap();

        let original = journal.get_entry(id).unwrap();
        let restored = journal.get_entry(second).unwrap();

        prop_assert_eq!(original.lines.len(), restored.lines.len());
        for (a, b) in original.lines.iter().zip(restored.lines.iter()) {
            prop_assert_eq!(&a.account_code, &b.account_code);
            prop_assert_eq!(a.debit, b.debit);
            prop_assert_eq!(a.credit, b.credit);
        }
    }
}

/// Entry numbers stay unique and contiguous under concurrent creation
/// for the same store and fiscal year.
#[test]
fn test_concurrent_entry_numbers_unique_and_contiguous() {
    let (journal, store_id) = setup();
    let journal = Arc::new(journal);

    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let journal = Arc::clone(&journal);
        handles.push(std::thread::spawn(move || {
            (0..PER_THREAD)
                .map(|_| {
                    let id = journal.create_entry(header(store_id)).unwrap();
                    journal.get_entry(id).unwrap().entry_number
                })
                .collect::<Vec<_>>()
        }));
    }

    let mut numbers: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), THREADS * PER_THREAD, "numbers must be unique");

    // All entries share year 2026 / month 06; the trailing sequence
    // must form 1..=N with no gaps.
    let mut sequences: Vec<u32> = numbers
        .iter()
        .map(|n| n["202606".len()..].parse().unwrap())
        .collect();
    sequences.sort_unstable();
    let expected: Vec<u32> = (1..=(THREADS * PER_THREAD) as u32).collect();
    assert_eq!(sequences, expected, "sequence must be contiguous");
}
