//! The fixed reference account plan.
//!
//! Every store's chart is seeded from this table at onboarding. Codes
//! follow the French plan comptable layout the platform reports against.
//! The table is validated for duplicate codes when a chart is built;
//! a duplicate is a load-time error, never a silent overwrite.

use std::collections::BTreeMap;

use tavolo_shared::types::AccountId;

use super::error::ChartError;
use super::types::{Account, AccountCategory};

/// One row of the reference plan.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceAccount {
    /// Hierarchical account code.
    pub code: &'static str,
    /// Account name.
    pub name: &'static str,
    /// Classification, which also fixes the account type.
    pub category: AccountCategory,
    /// Whether journal lines may be posted to this account.
    pub postable: bool,
}

const fn account(
    code: &'static str,
    name: &'static str,
    category: AccountCategory,
    postable: bool,
) -> ReferenceAccount {
    ReferenceAccount {
        code,
        name,
        category,
        postable,
    }
}

const REFERENCE_PLAN: &[ReferenceAccount] = &[
    account("101", "Capital", AccountCategory::Capital, true),
    account("164", "Borrowings", AccountCategory::Borrowings, true),
    account("215", "Kitchen equipment", AccountCategory::FixedAssets, true),
    account("218", "Fittings and furniture", AccountCategory::FixedAssets, true),
    account("31", "Raw materials stock", AccountCategory::Inventory, true),
    account("37", "Merchandise stock", AccountCategory::Inventory, true),
    account("401", "Suppliers", AccountCategory::Suppliers, true),
    account("411", "Customers", AccountCategory::Customers, true),
    account("421", "Staff - net wages payable", AccountCategory::Payroll, true),
    account("431", "Social security", AccountCategory::SocialSecurity, true),
    // 445x: the VAT family. The parent is a grouping account and never
    // receives lines directly.
    account("445", "State - VAT", AccountCategory::VatDue, false),
    account("44551", "VAT due", AccountCategory::VatDue, true),
    account("44567", "VAT credit carried forward", AccountCategory::VatCredit, true),
    account("4456", "VAT deductible on purchases", AccountCategory::VatDeductible, true),
    account("4457", "VAT collected on sales", AccountCategory::VatCollected, true),
    account("512", "Bank", AccountCategory::Bank, true),
    account("517", "Mobile payment providers", AccountCategory::MobileReceivables, true),
    account("53", "Cash registers", AccountCategory::CashRegister, true),
    account("601", "Purchases - raw materials", AccountCategory::Purchases, true),
    account("607", "Purchases - merchandise", AccountCategory::Purchases, true),
    account("613", "Rent", AccountCategory::ExternalServices, true),
    account("626", "Utilities and telecom", AccountCategory::ExternalServices, true),
    account("641", "Staff wages", AccountCategory::Wages, true),
    account("645", "Employer social charges", AccountCategory::SocialCharges, true),
    account("701", "Meal sales", AccountCategory::Sales, true),
    account("706", "Service revenue", AccountCategory::ServiceRevenue, true),
    account("707", "Merchandise sales", AccountCategory::Sales, true),
];

/// Returns the reference plan rows.
#[must_use]
pub fn reference_plan() -> &'static [ReferenceAccount] {
    REFERENCE_PLAN
}

/// Builds the account set for a new chart from a reference plan.
///
/// Each account receives a fresh identity so charts never share
/// account IDs across stores.
///
/// # Errors
///
/// Returns [`ChartError::DuplicateReferenceCode`] if the plan defines
/// the same code twice.
pub fn build_accounts(
    plan: &[ReferenceAccount],
) -> Result<BTreeMap<String, Account>, ChartError> {
    let mut accounts = BTreeMap::new();

    for row in plan {
        let account = Account {
            id: AccountId::new(),
            code: row.code.to_string(),
            name: row.name.to_string(),
            category: row.category,
            postable: row.postable,
            active: true,
        };
        if accounts.insert(row.code.to_string(), account).is_some() {
            return Err(ChartError::DuplicateReferenceCode(row.code.to_string()));
        }
    }

    Ok(accounts)
}
