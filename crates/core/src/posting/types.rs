//! Order and payment lifecycle events.
//!
//! These are consumed, not produced, by the ledger. Shapes mirror the
//! commerce subsystem's payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tavolo_shared::types::{OrderId, StoreId};

use crate::accounts::types::AccountCategory;

/// How a customer settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Paid at the register.
    Cash,
    /// Card or transfer, landing in the bank account.
    Bank,
    /// Mobile wallet, landing with the provider first.
    Mobile,
}

impl PaymentMethod {
    /// The account category the settled amount lands on.
    #[must_use]
    pub fn settlement_category(self) -> AccountCategory {
        match self {
            Self::Cash => AccountCategory::CashRegister,
            Self::Bank => AccountCategory::Bank,
            Self::Mobile => AccountCategory::MobileReceivables,
        }
    }
}

/// An order reached the completed state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCompleted {
    /// The order.
    pub order_id: OrderId,
    /// The store that served it.
    pub store_id: StoreId,
    /// Total charged, tax included.
    pub total_amount: Decimal,
    /// Tax portion of the total.
    pub tax_amount: Decimal,
    /// How the customer will pay.
    pub payment_method: PaymentMethod,
    /// When the order completed.
    pub timestamp: DateTime<Utc>,
}

/// A payment for an order was settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSettled {
    /// The order being paid.
    pub order_id: OrderId,
    /// The store.
    pub store_id: StoreId,
    /// Amount settled.
    pub amount: Decimal,
    /// Settlement channel.
    pub method: PaymentMethod,
    /// When the payment settled.
    pub timestamp: DateTime<Utc>,
}
