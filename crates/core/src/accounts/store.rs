//! Chart of accounts store.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use dashmap::DashMap;
use tavolo_shared::types::{ChartId, StoreId};
use tavolo_shared::LedgerConfig;

use super::error::ChartError;
use super::reference::{build_accounts, reference_plan};
use super::types::ChartOfAccounts;
use crate::cache::ChartCache;

/// Owns every store's chart of accounts.
///
/// Reads go through a short-TTL cache; the backing map is the source of
/// truth and account edits invalidate the cached copy.
pub struct ChartStore {
    charts: DashMap<StoreId, Arc<ChartOfAccounts>>,
    cache: ChartCache,
}

impl ChartStore {
    /// Creates an empty store with cache settings from the configuration.
    #[must_use]
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            charts: DashMap::new(),
            cache: ChartCache::with_config(config.chart_cache_capacity, config.chart_cache_ttl_secs),
        }
    }

    /// Creates a store's chart, seeded from the reference plan.
    ///
    /// The fiscal year is bound to the calendar year of creation and is
    /// immutable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ChartExists`] if the store already has a
    /// chart, or [`ChartError::DuplicateReferenceCode`] if the reference
    /// plan is defective.
    pub fn create_chart(
        &self,
        store_id: StoreId,
        name: &str,
    ) -> Result<Arc<ChartOfAccounts>, ChartError> {
        let accounts = build_accounts(reference_plan())?;
        let year = Utc::now().year();
        let chart = Arc::new(ChartOfAccounts {
            id: ChartId::new(),
            store_id,
            name: name.to_string(),
            fiscal_year_start: NaiveDate::from_ymd_opt(year, 1, 1)
                .unwrap_or_else(|| Utc::now().date_naive()),
            fiscal_year_end: NaiveDate::from_ymd_opt(year, 12, 31)
                .unwrap_or_else(|| Utc::now().date_naive()),
            accounts,
            created_at: Utc::now(),
        });

        // Entry API guarantees a single winner under concurrent onboarding.
        match self.charts.entry(store_id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(ChartError::ChartExists(store_id)),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&chart));
                tracing::info!(%store_id, chart_id = %chart.id, "chart of accounts created");
                Ok(chart)
            }
        }
    }

    /// Returns a store's chart with its accounts loaded.
    ///
    /// An absent chart is a normal negative result, not an error.
    #[must_use]
    pub fn get_chart(&self, store_id: StoreId) -> Option<Arc<ChartOfAccounts>> {
        if let Some(chart) = self.cache.get(store_id) {
            return Some(chart);
        }

        let chart = self.charts.get(&store_id).map(|c| Arc::clone(c.value()))?;
        self.cache.insert(store_id, Arc::clone(&chart));
        Some(chart)
    }

    /// Returns a store's chart, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ChartNotFound`] if the store has no chart.
    pub fn require_chart(&self, store_id: StoreId) -> Result<Arc<ChartOfAccounts>, ChartError> {
        self.get_chart(store_id)
            .ok_or(ChartError::ChartNotFound(store_id))
    }

    /// Soft-deactivates an account.
    ///
    /// The account stops accepting new lines but stays resolvable for
    /// historical entries. Accounts are never deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ChartNotFound`] or
    /// [`ChartError::AccountNotFound`].
    pub fn deactivate_account(&self, store_id: StoreId, code: &str) -> Result<(), ChartError> {
        let mut slot = self
            .charts
            .get_mut(&store_id)
            .ok_or(ChartError::ChartNotFound(store_id))?;

        let mut chart = (**slot.value()).clone();
        let account = chart
            .accounts
            .get_mut(code)
            .ok_or_else(|| ChartError::AccountNotFound {
                store_id,
                code: code.to_string(),
            })?;
        account.active = false;
        *slot.value_mut() = Arc::new(chart);
        drop(slot);

        self.cache.invalidate(store_id);
        tracing::debug!(%store_id, code, "account deactivated");
        Ok(())
    }
}
