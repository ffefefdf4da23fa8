//! Shared error types.

use thiserror::Error;

/// Result type alias using `SharedError`.
pub type SharedResult<T> = Result<T, SharedError>;

/// Errors raised by the shared layer.
#[derive(Debug, Error)]
pub enum SharedError {
    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A configuration value is outside its valid range.
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfigValue {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl SharedError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidConfigValue { .. } => "INVALID_CONFIG_VALUE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SharedError::InvalidConfigValue {
            field: "vat_due_day",
            reason: "must be between 1 and 28".to_string(),
        };
        assert_eq!(err.error_code(), "INVALID_CONFIG_VALUE");
    }

    #[test]
    fn test_error_display() {
        let err = SharedError::InvalidConfigValue {
            field: "balance_tolerance",
            reason: "must not be negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for balance_tolerance: must not be negative"
        );
    }
}
