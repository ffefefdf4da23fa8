//! The VAT rate table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// VAT rate categories of the host country's multi-rate regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatRateCategory {
    /// Standard rate, 20%. Alcohol, confectionery.
    Standard,
    /// Reduced rate, 10%. Prepared food for immediate consumption.
    Reduced,
    /// Super-reduced rate, 7%. Staple groceries sold to take away.
    SuperReduced,
    /// Zero-rated. VAT applies at 0% but stays in the VAT system.
    Zero,
    /// Exempt. No VAT charged and no input VAT deduction.
    Exempt,
}

impl VatRateCategory {
    /// Returns the rate as a percentage.
    #[must_use]
    pub fn rate(self) -> Decimal {
        match self {
            Self::Standard => Decimal::new(20, 0),
            Self::Reduced => Decimal::new(10, 0),
            Self::SuperReduced => Decimal::new(7, 0),
            Self::Zero | Self::Exempt => Decimal::ZERO,
        }
    }

    /// Returns true if input VAT under this category is deductible.
    ///
    /// Exemption is the only category outside the deduction system.
    #[must_use]
    pub fn allows_deduction(self) -> bool {
        !matches!(self, Self::Exempt)
    }
}
