//! Account and chart domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tavolo_shared::types::{AccountId, ChartId, StoreId};

/// Account types for balance calculation rules.
///
/// - Asset/Expense: balance += debit - credit (debit-normal)
/// - Liability/Equity/Revenue: balance += credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned by the store (cash, receivables, stock).
    Asset,
    /// Amounts owed to third parties (suppliers, VAT, payroll).
    Liability,
    /// Owner capital and accumulated results.
    Equity,
    /// Income from sales and services.
    Revenue,
    /// Operating costs.
    Expense,
}

impl AccountType {
    /// Returns true for debit-normal account types (Asset, Expense).
    #[must_use]
    pub fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Calculates the signed balance change of a line for this type.
    ///
    /// Debit-normal: debit - credit. Credit-normal: credit - debit.
    #[must_use]
    pub fn balance_change(
        self,
        debit: rust_decimal::Decimal,
        credit: rust_decimal::Decimal,
    ) -> rust_decimal::Decimal {
        if self.is_debit_normal() {
            debit - credit
        } else {
            credit - debit
        }
    }
}

/// Finer account classification.
///
/// A closed enumeration with an exhaustive mapping to [`AccountType`]:
/// a new category that is not mapped fails to compile instead of
/// silently defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Owner capital.
    Capital,
    /// Loans and borrowings.
    Borrowings,
    /// Equipment and fittings.
    FixedAssets,
    /// Food and beverage stock.
    Inventory,
    /// Supplier payables.
    Suppliers,
    /// Customer receivables.
    Customers,
    /// Net wages due to staff.
    Payroll,
    /// Social security contributions due.
    SocialSecurity,
    /// Deductible VAT on purchases.
    VatDeductible,
    /// VAT collected on sales.
    VatCollected,
    /// Net VAT due to the tax authority.
    VatDue,
    /// VAT credit carried forward.
    VatCredit,
    /// Bank accounts.
    Bank,
    /// Cash registers.
    CashRegister,
    /// Amounts in transit from mobile payment providers.
    MobileReceivables,
    /// Purchases of goods and raw materials.
    Purchases,
    /// Rent, utilities, and other external services.
    ExternalServices,
    /// Gross wages.
    Wages,
    /// Employer social charges.
    SocialCharges,
    /// Sales of goods (food, merchandise).
    Sales,
    /// Service revenue (delivery fees, catering).
    ServiceRevenue,
}

impl AccountCategory {
    /// Returns the account type this category belongs to.
    #[must_use]
    pub fn account_type(self) -> AccountType {
        match self {
            Self::Capital => AccountType::Equity,
            Self::Borrowings
            | Self::Suppliers
            | Self::Payroll
            | Self::SocialSecurity
            | Self::VatCollected
            | Self::VatDue => AccountType::Liability,
            Self::FixedAssets
            | Self::Inventory
            | Self::Customers
            | Self::VatDeductible
            | Self::VatCredit
            | Self::Bank
            | Self::CashRegister
            | Self::MobileReceivables => AccountType::Asset,
            Self::Purchases | Self::ExternalServices | Self::Wages | Self::SocialCharges => {
                AccountType::Expense
            }
            Self::Sales | Self::ServiceRevenue => AccountType::Revenue,
        }
    }
}

/// A single account in a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Hierarchical account code (e.g. "445", "4457").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Finer classification.
    pub category: AccountCategory,
    /// Whether journal lines may be posted to this account.
    pub postable: bool,
    /// Soft deactivation flag. Inactive accounts reject new lines but
    /// remain resolvable for historical entries.
    pub active: bool,
}

impl Account {
    /// Returns the account type, derived from the category.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        self.category.account_type()
    }

    /// Returns the hierarchy level, derived from the code length.
    #[must_use]
    pub fn level(&self) -> usize {
        self.code.len()
    }

    /// Returns true if this account currently accepts journal lines.
    #[must_use]
    pub fn accepts_postings(&self) -> bool {
        self.postable && self.active
    }
}

/// A store's chart of accounts.
///
/// Created once at store onboarding. Account codes are unique within
/// the chart; fiscal-year bounds are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    /// Unique identifier.
    pub id: ChartId,
    /// The store owning this chart.
    pub store_id: StoreId,
    /// Chart name (usually the store name).
    pub name: String,
    /// First day of the fiscal year.
    pub fiscal_year_start: NaiveDate,
    /// Last day of the fiscal year.
    pub fiscal_year_end: NaiveDate,
    /// Accounts, ordered by code.
    pub accounts: BTreeMap<String, Account>,
    /// When the chart was created.
    pub created_at: DateTime<Utc>,
}

impl ChartOfAccounts {
    /// Looks up an account by code.
    #[must_use]
    pub fn account(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }

    /// Looks up an account by ID.
    #[must_use]
    pub fn account_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.values().find(|a| a.id == id)
    }

    /// Finds the first postable account with the given category.
    ///
    /// Activity is not checked here; the journal engine rejects lines
    /// on deactivated accounts when they are attached.
    #[must_use]
    pub fn account_for_category(&self, category: AccountCategory) -> Option<&Account> {
        self.accounts
            .values()
            .find(|a| a.category == category && a.postable)
    }

    /// Iterates over postable accounts in code order.
    pub fn postable_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values().filter(|a| a.postable)
    }
}
