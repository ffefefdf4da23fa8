//! Posting rules for order and payment events.

use rust_decimal::Decimal;
use tavolo_shared::types::{EntryId, StoreId, UserId};

use super::types::{OrderCompleted, PaymentSettled};
use crate::accounts::error::ChartError;
use crate::accounts::store::ChartStore;
use crate::accounts::types::AccountCategory;
use crate::journal::error::LedgerError;
use crate::journal::store::Journal;
use crate::journal::types::{JournalCode, NewEntry, NewLine};

/// Turns commerce events into journal entries.
///
/// Stateless apart from its collaborators; every posting either creates
/// exactly one balanced entry or leaves the journal untouched.
pub struct PostingService<'a> {
    charts: &'a ChartStore,
    journal: &'a Journal,
    /// Author stamped on auto-generated entries.
    author: UserId,
}

impl<'a> PostingService<'a> {
    /// Creates a posting service recording entries as the given author.
    #[must_use]
    pub const fn new(charts: &'a ChartStore, journal: &'a Journal, author: UserId) -> Self {
        Self {
            charts,
            journal,
            author,
        }
    }

    /// Posts the sales entry for a completed order.
    ///
    /// Credits revenue for `total - tax`, credits VAT collected for the
    /// tax, debits the customer receivable for the full total. A zero
    /// tax amount omits the tax line.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] for inconsistent amounts, or
    /// the underlying chart/journal error. No entry is visible after a
    /// failure.
    pub fn post_order_completed(&self, event: &OrderCompleted) -> Result<EntryId, LedgerError> {
        validate_order_amounts(event.total_amount, event.tax_amount)?;

        let receivable = self.resolve(event.store_id, AccountCategory::Customers)?;
        let revenue = self.resolve(event.store_id, AccountCategory::Sales)?;
        let vat_collected = self.resolve(event.store_id, AccountCategory::VatCollected)?;

        let net = event.total_amount - event.tax_amount;
        let mut lines = vec![
            NewLine::debit(&receivable, event.total_amount, "Order total")
                .for_order(event.order_id),
            NewLine::credit(&revenue, net, "Order revenue").for_order(event.order_id),
        ];
        if event.tax_amount > Decimal::ZERO {
            lines.push(
                NewLine::credit(&vat_collected, event.tax_amount, "VAT on order")
                    .for_order(event.order_id),
            );
        }

        let entry_id = self.post_atomically(
            NewEntry {
                store_id: event.store_id,
                journal_code: JournalCode::Sales,
                date: event.timestamp.date_naive(),
                description: format!("Order {} completed", event.order_id),
                author: self.author,
            },
            lines,
        )?;
        tracing::info!(order_id = %event.order_id, entry_id = %entry_id, "sales entry posted");
        Ok(entry_id)
    }

    /// Posts the settlement entry for a paid order.
    ///
    /// Debits the cash account selected by payment method, credits the
    /// customer receivable.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] for a non-positive amount,
    /// or the underlying chart/journal error.
    pub fn post_payment_settled(&self, event: &PaymentSettled) -> Result<EntryId, LedgerError> {
        if event.amount <= Decimal::ZERO {
            return Err(LedgerError::Validation {
                fields: vec!["amount".to_string()],
            });
        }

        let cash = self.resolve(event.store_id, event.method.settlement_category())?;
        let receivable = self.resolve(event.store_id, AccountCategory::Customers)?;

        let lines = vec![
            NewLine::debit(&cash, event.amount, "Payment received").for_order(event.order_id),
            NewLine::credit(&receivable, event.amount, "Order settled").for_order(event.order_id),
        ];

        let entry_id = self.post_atomically(
            NewEntry {
                store_id: event.store_id,
                journal_code: JournalCode::Bank,
                date: event.timestamp.date_naive(),
                description: format!("Payment for order {}", event.order_id),
                author: self.author,
            },
            lines,
        )?;
        tracing::info!(order_id = %event.order_id, entry_id = %entry_id, "settlement entry posted");
        Ok(entry_id)
    }

    /// Reverses the sales entry of a cancelled order.
    ///
    /// # Errors
    ///
    /// Returns the underlying journal error if the entry cannot be
    /// reversed.
    pub fn post_order_cancelled(&self, sales_entry: EntryId) -> Result<EntryId, LedgerError> {
        let reversal = self.journal.reverse_entry(sales_entry)?;
        tracing::info!(original = %sales_entry, reversal = %reversal, "order cancellation posted");
        Ok(reversal)
    }

    /// Creates an entry and attaches its lines as one logical step.
    ///
    /// If line attachment fails the draft is discarded, so readers
    /// never observe a half-posted entry.
    fn post_atomically(
        &self,
        header: NewEntry,
        lines: Vec<NewLine>,
    ) -> Result<EntryId, LedgerError> {
        let entry_id = self.journal.create_entry(header)?;
        if let Err(err) = self.journal.add_lines(entry_id, lines) {
            // Best effort; the draft is invisible to balances either way.
            let _ = self.journal.discard_draft(entry_id);
            return Err(err);
        }
        Ok(entry_id)
    }

    fn resolve(
        &self,
        store_id: StoreId,
        category: AccountCategory,
    ) -> Result<String, LedgerError> {
        let chart = self.charts.require_chart(store_id)?;
        let account =
            chart
                .account_for_category(category)
                .ok_or(ChartError::CategoryNotFound {
                    store_id,
                    category,
                })?;
        Ok(account.code.clone())
    }
}

fn validate_order_amounts(total: Decimal, tax: Decimal) -> Result<(), LedgerError> {
    let mut fields = Vec::new();
    if total <= Decimal::ZERO {
        fields.push("total_amount".to_string());
    }
    if tax < Decimal::ZERO || tax > total {
        fields.push("tax_amount".to_string());
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::Validation { fields })
    }
}
