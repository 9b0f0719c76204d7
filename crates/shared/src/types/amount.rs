//! Amount tolerance helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; equality between derived and
//! stored figures is always checked within a fixed tolerance because
//! historical data contains sub-cent rounding residue.

use rust_decimal::Decimal;

/// The tolerance applied to every derived-vs-stored amount comparison (0.01).
#[must_use]
pub fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Returns true if two amounts agree within [`tolerance`].
#[must_use]
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= tolerance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tolerance_value() {
        assert_eq!(tolerance(), dec!(0.01));
    }

    #[test]
    fn test_within_tolerance_exact() {
        assert!(within_tolerance(dec!(100), dec!(100)));
    }

    #[test]
    fn test_within_tolerance_at_boundary() {
        assert!(within_tolerance(dec!(100.00), dec!(100.01)));
        assert!(within_tolerance(dec!(100.01), dec!(100.00)));
    }

    #[test]
    fn test_outside_tolerance() {
        assert!(!within_tolerance(dec!(100.00), dec!(100.02)));
        assert!(!within_tolerance(dec!(500), dec!(0)));
    }
}
