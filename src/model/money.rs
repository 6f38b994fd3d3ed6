//! Currency amounts.
//!
//! Prices are `rust_decimal::Decimal`, so sums of `price * quantity` are exact and the
//! cart total never drifts from its items.

use rust_decimal::Decimal;

/// Amount in the store currency.
pub type Money = Decimal;

/// Digits kept after the decimal point.
pub const CURRENCY_SCALE: u32 = 2;

/// Round to cents (banker's rounding, as `Decimal::round_dp` does).
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp(CURRENCY_SCALE)
}

/// `price * quantity` for one line.
pub fn line_total(price: Money, quantity: u32) -> Money {
    price * Money::from(quantity)
}

/// Formats an amount for user-facing messages, e.g. `R$ 3.99`.
pub fn format_brl(amount: Money) -> String {
    format!("R$ {:.2}", round_currency(amount))
}
