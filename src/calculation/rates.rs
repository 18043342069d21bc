//! Guarded ratios and output rounding.
//!
//! Rates never propagate a division by zero: a zero denominator yields 0.
//! Rounding happens once, when a result is assembled.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Decimal places kept on every reported hour, money, and rate value.
pub const OUTPUT_DECIMAL_PLACES: u32 = 2;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a value for output, half away from zero.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::round_output;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_output(Decimal::from_str("29.585798").unwrap()), Decimal::from_str("29.59").unwrap());
/// assert_eq!(round_output(Decimal::from_str("-0.125").unwrap()), Decimal::from_str("-0.13").unwrap());
/// ```
pub fn round_output(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(OUTPUT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides, returning 0 when the denominator is zero.
pub fn safe_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Expresses `numerator / denominator` as a percentage clamped to `[0, 100]`.
///
/// A zero denominator yields 0.
pub fn percentage(numerator: Decimal, denominator: Decimal) -> Decimal {
    (safe_ratio(numerator, denominator) * HUNDRED).clamp(Decimal::ZERO, HUNDRED)
}

/// [`percentage`] over day counts.
pub fn day_percentage(numerator: u32, denominator: u32) -> Decimal {
    percentage(Decimal::from(numerator), Decimal::from(denominator))
}

/// Unwraps a checked `Decimal` operation, reporting overflow against `field`.
pub(crate) fn in_range(
    value: Option<Decimal>,
    field: &str,
    quantity: &str,
) -> EngineResult<Decimal> {
    value.ok_or_else(|| {
        EngineError::invalid_input(field, format!("{} exceeds the representable range", quantity))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_output_midpoint_away_from_zero() {
        assert_eq!(round_output(dec("1.005")), dec("1.01"));
        assert_eq!(round_output(dec("1.004")), dec("1.00"));
        assert_eq!(round_output(dec("-1.005")), dec("-1.01"));
    }

    #[test]
    fn test_safe_ratio_zero_denominator() {
        assert_eq!(safe_ratio(dec("10"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_ratio(dec("10"), dec("4")), dec("2.5"));
    }

    #[test]
    fn test_percentage_is_clamped() {
        assert_eq!(percentage(dec("3"), dec("2")), dec("100"));
        assert_eq!(percentage(dec("-1"), dec("2")), Decimal::ZERO);
        assert_eq!(percentage(dec("1"), dec("4")), dec("25"));
    }

    #[test]
    fn test_in_range_reports_overflow() {
        assert_eq!(in_range(dec("2").checked_mul(dec("3")), "x", "y").unwrap(), dec("6"));

        match in_range(Decimal::MAX.checked_mul(dec("2")), "base_salary", "regular pay") {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "base_salary");
                assert!(message.contains("regular pay"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_day_percentage_zero_days() {
        assert_eq!(day_percentage(0, 0), Decimal::ZERO);
        assert_eq!(round_output(day_percentage(24, 26)), dec("92.31"));
    }
}
