//! Ledger configuration management.
//!
//! The tolerance and VAT due-date values are jurisdiction assumptions,
//! not verified business rules, so they are parameters with defaults
//! rather than constants.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{SharedError, SharedResult};

/// Runtime configuration for the ledger subsystem.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Maximum absolute difference between entry debits and credits
    /// still considered balanced (absorbs per-line rounding).
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
    /// Day of the month following a period on which VAT falls due.
    #[serde(default = "default_vat_due_day")]
    pub vat_due_day: u32,
    /// Time-to-live for cached per-store charts, in seconds.
    #[serde(default = "default_chart_cache_ttl_secs")]
    pub chart_cache_ttl_secs: u64,
    /// Maximum number of charts held in the cache.
    #[serde(default = "default_chart_cache_capacity")]
    pub chart_cache_capacity: u64,
}

fn default_balance_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_vat_due_day() -> u32 {
    20
}

fn default_chart_cache_ttl_secs() -> u64 {
    60
}

fn default_chart_cache_capacity() -> u64 {
    500
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
            vat_due_day: default_vat_due_day(),
            chart_cache_ttl_secs: default_chart_cache_ttl_secs(),
            chart_cache_capacity: default_chart_cache_capacity(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Environment variables use the `TAVOLO` prefix, e.g.
    /// `TAVOLO__VAT_DUE_DAY=15`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or a value is
    /// outside its valid range.
    pub fn load() -> SharedResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TAVOLO").separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Validates value ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is outside its valid range.
    pub fn validate(&self) -> SharedResult<()> {
        if self.balance_tolerance < Decimal::ZERO {
            return Err(SharedError::InvalidConfigValue {
                field: "balance_tolerance",
                reason: "must not be negative".to_string(),
            });
        }
        // Day 29+ does not exist in every month.
        if self.vat_due_day == 0 || self.vat_due_day > 28 {
            return Err(SharedError::InvalidConfigValue {
                field: "vat_due_day",
                reason: "must be between 1 and 28".to_string(),
            });
        }
        Ok(())
    }
}
