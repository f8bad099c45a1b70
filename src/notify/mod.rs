use rust_decimal::Decimal;

use crate::execution::order_action::Side;
use crate::types::{instrument::Instrument, price::Price};

/// Fire-and-forget sink for operator-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "notify", "{message}");
    }
}

pub fn fill_message(side: Side, amount: Decimal, instrument: &Instrument, price: Price) -> String {
    format!(
        "{side} {} {instrument} at {}",
        four_places(amount),
        four_places(price.as_decimal())
    )
}

fn four_places(value: Decimal) -> Decimal {
    let mut value = value.round_dp(4);
    value.rescale(4);
    value
}
