pub mod atr;
pub mod signal_state;
