use rust_decimal::Decimal;

use crate::market::price_type::PriceType;
use crate::types::quote::Quote;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteTarget {
    pub bid: Option<Quote>,
    pub ask: Option<Quote>,
}

impl QuoteTarget {
    pub fn two_sided(bid: Quote, ask: Quote) -> Self {
        Self {
            bid: Some(bid),
            ask: Some(ask),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bid.is_none() && self.ask.is_none()
    }

    pub fn quotes(&self) -> impl Iterator<Item = &Quote> {
        self.bid.iter().chain(self.ask.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoQuoteReason {
    MissingReferencePrice { price_type: PriceType },
    NonPositiveReferencePrice { price: Decimal },
    InvalidAmount { amount: Decimal },
}
