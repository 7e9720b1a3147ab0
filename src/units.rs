//! Currency unit conversion
//!
//! Every amount on the wire is an integer count of centavos. These helpers are the
//! only place fractional reais appear.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert reais to centavos, rounding half away from zero.
///
/// Lossy: inputs with more than two decimal places are rounded. Negative
/// midpoints round away from zero too, so `-0.125` gives `-13`, not `-12`.
pub fn to_minor_units(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Convert centavos to reais without rounding
pub fn to_major_units(value: i64) -> f64 {
    value as f64 / 100.0
}

/// Exact variant of [`to_minor_units`]; `None` when the result does not fit in `i64`
pub fn decimal_to_minor_units(value: Decimal) -> Option<i64> {
    value
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Exact variant of [`to_major_units`]
pub fn minor_units_to_decimal(value: i64) -> Decimal {
    Decimal::new(value, 2)
}
