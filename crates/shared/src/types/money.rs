//! Money arithmetic helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; derived amounts are rounded
//! with banker's rounding (round half to even) to minimize cumulative
//! errors across many small restaurant tickets.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places carried by monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a derived amount to monetary precision.
///
/// Uses banker's rounding (round half to even).
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if two amounts are equal within the given tolerance.
///
/// Journal balancing uses this rather than strict equality so that
/// rounded per-line tax amounts cannot wedge an otherwise correct entry.
#[must_use]
pub fn within_tolerance(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_amount() {
        assert_eq!(round_amount(dec!(10.005)), dec!(10.00)); // rounds to even
        assert_eq!(round_amount(dec!(10.015)), dec!(10.02)); // rounds to even
        assert_eq!(round_amount(dec!(10.014)), dec!(10.01));
        assert_eq!(round_amount(dec!(10)), dec!(10.00));
    }

    #[test]
    fn test_within_tolerance() {
        let tol = dec!(0.01);
        assert!(within_tolerance(dec!(100.00), dec!(100.00), tol));
        assert!(within_tolerance(dec!(100.00), dec!(100.01), tol));
        assert!(within_tolerance(dec!(100.01), dec!(100.00), tol));
        assert!(!within_tolerance(dec!(100.00), dec!(100.02), tol));
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        assert!(within_tolerance(dec!(0), dec!(0.01), dec!(0.01)));
        assert!(!within_tolerance(dec!(0), dec!(0.011), dec!(0.01)));
    }
}
