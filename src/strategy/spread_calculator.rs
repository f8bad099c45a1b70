use rust_decimal::Decimal;

use crate::execution::order_action::Side;
use crate::types::{
    price::Price, quote::Quote, quote_target::NoQuoteReason, spread_bounds::SpreadBounds,
};

/// Fractional spread for the given volatility, clamped to `bounds`.
///
/// Missing or non-positive volatility falls back to
/// `reference_price * min_spread`, which always lands on `min_spread`.
pub fn dynamic_spread(
    reference_price: Decimal,
    volatility: Option<Decimal>,
    multiplier: Decimal,
    bounds: SpreadBounds,
) -> Decimal {
    let volatility = volatility
        .filter(|value| *value > Decimal::ZERO)
        .unwrap_or(reference_price * bounds.min());

    /* NOTE: overflow means the raw spread is enormous, so it clamps to max */
    let raw_spread = volatility
        .checked_mul(multiplier)
        .and_then(|scaled| scaled.checked_div(reference_price))
        .unwrap_or(bounds.max());

    bounds.clamp(raw_spread)
}

/// Symmetric bid/ask around `reference_price`.
pub fn compute_quotes(
    reference_price: Price,
    volatility: Option<Decimal>,
    multiplier: Decimal,
    bounds: SpreadBounds,
    amount: Decimal,
) -> Result<(Quote, Quote), NoQuoteReason> {
    if !reference_price.is_positive() {
        return Err(NoQuoteReason::NonPositiveReferencePrice {
            price: reference_price.as_decimal(),
        });
    }
    if amount <= Decimal::ZERO {
        return Err(NoQuoteReason::InvalidAmount { amount });
    }

    let reference = reference_price.as_decimal();
    let spread = dynamic_spread(reference, volatility, multiplier, bounds);

    let bid_price = Price::new(reference * (Decimal::ONE - spread));
    let ask_price = Price::new(reference * (Decimal::ONE + spread));

    Ok((
        Quote::new(Side::Buy, bid_price, amount),
        Quote::new(Side::Sell, ask_price, amount),
    ))
}
