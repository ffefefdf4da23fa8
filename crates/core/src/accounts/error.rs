//! Chart of accounts error types.

use tavolo_shared::types::StoreId;
use thiserror::Error;

/// Errors raised by chart operations.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The store already has a chart; charts are created once.
    #[error("Store {0} already has a chart of accounts")]
    ChartExists(StoreId),

    /// The reference plan defines the same code more than once.
    ///
    /// Duplicate codes are a data-quality defect and must fail loudly at
    /// load time instead of one definition silently overwriting another.
    #[error("Reference plan defines account code {0} more than once")]
    DuplicateReferenceCode(String),

    /// The requested account does not exist in the store's chart.
    #[error("Account {code} not found for store {store_id}")]
    AccountNotFound {
        /// The store whose chart was searched.
        store_id: StoreId,
        /// The missing account code.
        code: String,
    },

    /// The store has no chart yet.
    #[error("No chart of accounts for store {0}")]
    ChartNotFound(StoreId),

    /// No active postable account carries the required category.
    #[error("No postable account with category {category:?} for store {store_id}")]
    CategoryNotFound {
        /// The store whose chart was searched.
        store_id: StoreId,
        /// The required category.
        category: crate::accounts::types::AccountCategory,
    },
}

impl ChartError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ChartExists(_) => "CHART_EXISTS",
            Self::DuplicateReferenceCode(_) => "DUPLICATE_REFERENCE_CODE",
            Self::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            Self::ChartNotFound(_) => "CHART_NOT_FOUND",
            Self::CategoryNotFound { .. } => "CATEGORY_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ChartError::DuplicateReferenceCode("421".to_string()).error_code(),
            "DUPLICATE_REFERENCE_CODE"
        );
        assert_eq!(
            ChartError::ChartNotFound(StoreId::new()).error_code(),
            "CHART_NOT_FOUND"
        );
    }

    #[test]
    fn test_duplicate_code_display() {
        let err = ChartError::DuplicateReferenceCode("431".to_string());
        assert_eq!(
            err.to_string(),
            "Reference plan defines account code 431 more than once"
        );
    }
}
