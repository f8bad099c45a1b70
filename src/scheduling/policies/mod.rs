pub mod candles_ready_policy;
pub mod refresh_interval_policy;
