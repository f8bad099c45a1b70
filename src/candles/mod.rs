pub mod candle;
pub mod candle_history;
pub mod candle_interval;
pub mod candle_store;
