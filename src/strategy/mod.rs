pub mod spread_calculator;
pub mod strategy;
pub mod volatility_spread_maker;
