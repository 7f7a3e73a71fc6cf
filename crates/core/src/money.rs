//! Fixed-point money helpers.
//!
//! Amounts are `rust_decimal::Decimal` end to end (Postgres `NUMERIC`), and
//! always carry exactly two fractional digits once rounded so they serialize
//! as stable strings like `"17.98"` rather than floats.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Round to cents (half away from zero) and pin the scale to two digits.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}
