use std::fmt;

use serde::Deserialize;

/// Which market price the quotes are centred on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    MidPrice,
    BestBid,
    BestAsk,
    LastTrade,
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MidPrice => write!(f, "mid_price"),
            Self::BestBid => write!(f, "best_bid"),
            Self::BestAsk => write!(f, "best_ask"),
            Self::LastTrade => write!(f, "last_trade"),
        }
    }
}
