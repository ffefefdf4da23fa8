//! Chart caching using Moka.
//!
//! Charts are read on every posting and report call but change only when
//! an account is edited, so they are cached per store with a short TTL.
//! The cache is purely an optimization: every hit is recomputable from
//! the backing store, and edits invalidate explicitly.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tavolo_shared::types::StoreId;

use crate::accounts::types::ChartOfAccounts;

/// Cache for per-store charts of accounts.
///
/// Thread-safe and suitable for concurrent access.
#[derive(Clone)]
pub struct ChartCache {
    cache: Cache<StoreId, Arc<ChartOfAccounts>>,
}

impl ChartCache {
    /// Creates a cache with the given capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Returns the cached chart for a store, if present and fresh.
    #[must_use]
    pub fn get(&self, store_id: StoreId) -> Option<Arc<ChartOfAccounts>> {
        self.cache.get(&store_id)
    }

    /// Stores a chart for a store.
    pub fn insert(&self, store_id: StoreId, chart: Arc<ChartOfAccounts>) {
        self.cache.insert(store_id, chart);
    }

    /// Drops the cached chart for a store after an account edit.
    pub fn invalidate(&self, store_id: StoreId) {
        self.cache.invalidate(&store_id);
    }
}
