//! Cart → order totals computation.
//!
//! Pure arithmetic over cart lines so the repository layer can run it inside
//! the checkout transaction and tests can check it without a database.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;
use crate::money::round_money;

/// Maximum quantity for a single cart line.
pub const MAX_LINE_QTY: i32 = 99;

/// Largest amount a `NUMERIC(12,2)` column holds.
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Totals that cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TotalsError {
    #[error("order amount exceeds the largest supported amount")]
    AmountTooLarge,
}

impl From<TotalsError> for CoreError {
    fn from(err: TotalsError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// One priced line going into an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub unit_price: Decimal,
    pub qty: i32,
}

impl PricedLine {
    /// `unit_price * qty`, rounded to cents.
    pub fn line_total(&self) -> Decimal {
        round_money(self.unit_price * Decimal::from(self.qty))
    }
}

/// Computed order amounts. Every field is rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Compute subtotal, tax, discount, and total for a set of lines.
///
/// `tax = subtotal * tax_rate`; no discount engine exists, so `discount`
/// is always zero. `total = subtotal + tax - discount`, computed from the
/// rounded components so the stored fields always add up exactly.
///
/// Fails if any amount overflows or exceeds [`max_amount`].
pub fn compute_totals(
    lines: &[PricedLine],
    tax_rate: Decimal,
) -> Result<OrderTotals, TotalsError> {
    let mut subtotal = Decimal::ZERO;
    for line in lines {
        subtotal = subtotal
            .checked_add(line.line_total())
            .ok_or(TotalsError::AmountTooLarge)?;
    }
    let subtotal = round_money(subtotal);
    let tax = round_money(
        subtotal
            .checked_mul(tax_rate)
            .ok_or(TotalsError::AmountTooLarge)?,
    );
    let discount = round_money(Decimal::ZERO);
    let total = subtotal
        .checked_add(tax)
        .and_then(|t| t.checked_sub(discount))
        .map(round_money)
        .ok_or(TotalsError::AmountTooLarge)?;

    if total > max_amount() {
        return Err(TotalsError::AmountTooLarge);
    }

    Ok(OrderTotals {
        subtotal,
        tax,
        discount,
        total,
    })
}

/// Validate a requested line quantity.
pub fn validate_qty(qty: i32) -> Result<(), String> {
    if !(1..=MAX_LINE_QTY).contains(&qty) {
        return Err(format!("qty must be between 1 and {MAX_LINE_QTY}"));
    }
    Ok(())
}
