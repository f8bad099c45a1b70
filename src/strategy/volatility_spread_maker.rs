use anyhow::Result;
use rust_decimal::Decimal;

use crate::{
    market::{market_state::MarketState, price_type::PriceType},
    signals::signal_state::SignalState,
    strategy::{spread_calculator::compute_quotes, strategy::Strategy},
    types::{
        quote_target::{NoQuoteReason, QuoteTarget},
        spread_bounds::SpreadBounds,
        strategy_config::StrategyConfig,
    },
};

/// Two-sided maker quoting whose half-spread follows ATR:
/// - reference price from the configured price source
/// - spread = ATR * multiplier / reference, clamped to the configured bounds
/// - fixed order amount on both sides
#[derive(Debug, Clone)]
pub struct VolatilitySpreadMaker {
    price_source: PriceType,
    atr_multiplier: Decimal,
    bounds: SpreadBounds,
    order_amount: Decimal,
}

impl VolatilitySpreadMaker {
    pub fn new(
        price_source: PriceType,
        atr_multiplier: Decimal,
        bounds: SpreadBounds,
        order_amount: Decimal,
    ) -> Self {
        Self {
            price_source,
            atr_multiplier,
            bounds,
            order_amount,
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Result<Self> {
        Ok(Self::new(
            config.price_source,
            config.atr_multiplier,
            config.spread_bounds()?,
            config.order_amount,
        ))
    }
}

impl Strategy for VolatilitySpreadMaker {
    fn compute_target(
        &self,
        market_state: &MarketState,
        signal_state: &SignalState,
    ) -> Result<QuoteTarget, NoQuoteReason> {
        let reference_price = market_state.price_by_type(self.price_source).ok_or(
            NoQuoteReason::MissingReferencePrice {
                price_type: self.price_source,
            },
        )?;

        let atr = signal_state.atr();
        let (bid, ask) = compute_quotes(
            reference_price,
            atr,
            self.atr_multiplier,
            self.bounds,
            self.order_amount,
        )?;

        tracing::debug!(
            reference = %reference_price,
            atr = ?atr,
            bid = %bid.price,
            ask = %ask.price,
            "computed quotes"
        );

        Ok(QuoteTarget::two_sided(bid, ask))
    }
}
