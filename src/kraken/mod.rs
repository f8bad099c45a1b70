pub mod kraken_candles;
pub mod kraken_market;
pub mod utils;
