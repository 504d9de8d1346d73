//! Money quantization helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` values held at cent resolution.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits every stored or compared amount carries.
pub const CENT_SCALE: u32 = 2;

/// Quantizes an amount to whole cents using round-half-up.
///
/// Ties round away from zero (`0.025` becomes `0.03`, `-0.025` becomes
/// `-0.03`); banker's rounding is never used. The result always has a scale
/// of exactly two, so `80` is returned as `80.00`.
#[must_use]
pub fn quantize_amount(amount: Decimal) -> Decimal {
    let mut quantized =
        amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    quantized.rescale(CENT_SCALE);
    quantized
}

/// Returns true if the amount carries no more than cent resolution.
#[must_use]
pub fn has_cent_precision(amount: Decimal) -> bool {
    amount.normalize().scale() <= CENT_SCALE
}
