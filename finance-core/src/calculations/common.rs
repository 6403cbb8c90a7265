//! Common rounding helpers shared by the calculator and the dashboard.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(33.333)), dec!(33.33));
/// assert_eq!(round_half_up(dec!(66.665)), dec!(66.67));
/// assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_half_up_dp(value, 2)
}

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
pub fn round_half_up_dp(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a float into a [`Decimal`] rounded to `dp` places, with trailing
/// zeros stripped.
///
/// This removes binary representation noise from float arithmetic, so the
/// result of `0.1 + 0.2` becomes exactly `0.3`. Returns `None` when the value
/// is not finite or does not fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::calculations::common::normalize_float;
///
/// assert_eq!(normalize_float(0.1 + 0.2, 10), Some(dec!(0.3)));
/// assert_eq!(normalize_float(1.0 / 3.0, 10), Some(dec!(0.3333333333)));
/// assert_eq!(normalize_float(f64::INFINITY, 10), None);
/// ```
pub fn normalize_float(
    value: f64,
    dp: u32,
) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let rounded = round_half_up_dp(Decimal::from_f64(value)?, dp).normalize();
    // -0 would otherwise render with a sign
    if rounded.is_zero() {
        Some(Decimal::ZERO)
    } else {
        Some(rounded)
    }
}
