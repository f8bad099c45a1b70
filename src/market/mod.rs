pub mod market_source;
pub mod market_state;
pub mod price_type;
