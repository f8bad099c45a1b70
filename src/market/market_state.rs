use std::fmt;
use std::time::Instant;

use rust_decimal::Decimal;

use crate::events::MarketEvent;
use crate::market::price_type::PriceType;
use crate::types::price::Price;

#[derive(Clone, Default)]
pub struct MarketState {
    best_bid: Option<Price>,
    best_ask: Option<Price>,
    last_trade_price: Option<Price>,
    last_event_instant: Option<Instant>,
}

impl MarketState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_market_event(&mut self, event: &MarketEvent) {
        self.last_event_instant = Some(Instant::now());

        match event {
            MarketEvent::TopOfBook {
                best_bid, best_ask, ..
            } => {
                self.best_bid = Some(*best_bid);
                self.best_ask = Some(*best_ask);
            }
            MarketEvent::Trade { price, .. } => {
                self.last_trade_price = Some(*price);
            }
            MarketEvent::Candle { .. } => {}
        }
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.best_bid
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.best_ask
    }

    pub fn mid_price(&self) -> Option<Price> {
        let bid = self.best_bid?.as_decimal();
        let ask = self.best_ask?.as_decimal();
        Some(Price::new((bid + ask) / Decimal::TWO))
    }

    pub fn last_trade_price(&self) -> Option<Price> {
        self.last_trade_price
    }

    pub fn price_by_type(&self, price_type: PriceType) -> Option<Price> {
        match price_type {
            PriceType::MidPrice => self.mid_price(),
            PriceType::BestBid => self.best_bid(),
            PriceType::BestAsk => self.best_ask(),
            PriceType::LastTrade => self.last_trade_price(),
        }
    }

    /// Both sides of the book have been seen at least once.
    pub fn is_ready(&self) -> bool {
        self.best_bid.is_some() && self.best_ask.is_some()
    }
}

impl fmt::Debug for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketState")
            .field("best_bid", &self.best_bid)
            .field("mid_price", &self.mid_price())
            .field("best_ask", &self.best_ask)
            .field("last_trade_price", &self.last_trade_price)
            .field("last_event_instant", &self.last_event_instant)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::instrument::Instrument;
    use rust_decimal_macros::dec;

    fn top_of_book(bid: Decimal, ask: Decimal) -> MarketEvent {
        MarketEvent::TopOfBook {
            instrument: Instrument::new("ETH", "USDT"),
            best_bid: Price::new(bid),
            best_ask: Price::new(ask),
            timestamp_ms: 0,
        }
    }

    #[test]
    fn empty_state_has_no_reference_price() {
        let state = MarketState::new();
        assert!(!state.is_ready());
        assert_eq!(state.price_by_type(PriceType::MidPrice), None);
        assert_eq!(state.price_by_type(PriceType::LastTrade), None);
    }

    #[test]
    fn prices_by_type() {
        let mut state = MarketState::new();
        state.on_market_event(&top_of_book(dec!(1999), dec!(2001)));
        state.on_market_event(&MarketEvent::Trade {
            instrument: Instrument::new("ETH", "USDT"),
            price: Price::new(dec!(2000.5)),
            quantity: dec!(0.3),
            timestamp_ms: 0,
        });

        assert!(state.is_ready());
        assert_eq!(state.price_by_type(PriceType::MidPrice), Some(Price::new(dec!(2000))));
        assert_eq!(state.price_by_type(PriceType::BestBid), Some(Price::new(dec!(1999))));
        assert_eq!(state.price_by_type(PriceType::BestAsk), Some(Price::new(dec!(2001))));
        assert_eq!(
            state.price_by_type(PriceType::LastTrade),
            Some(Price::new(dec!(2000.5)))
        );
    }
}
