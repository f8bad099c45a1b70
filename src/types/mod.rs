pub mod instrument;
pub mod inventory;
pub mod price;
pub mod quote;
pub mod quote_target;
pub mod spread_bounds;
pub mod strategy_config;
