use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use crate::types::instrument::Instrument;

/* Kraken still names bitcoin XBT on the v1 feeds */
fn kraken_asset(asset: &str) -> &str {
    match asset {
        "BTC" => "XBT",
        other => other,
    }
}

/// Pair as the websocket feed expects it, e.g. `ETH/USDT`.
pub fn ws_pair(instrument: &Instrument) -> String {
    format!(
        "{}/{}",
        kraken_asset(instrument.base()),
        kraken_asset(instrument.quote())
    )
}

/// Pair as the REST api expects it, e.g. `ETHUSDT`.
pub fn rest_pair(instrument: &Instrument) -> String {
    format!(
        "{}{}",
        kraken_asset(instrument.base()),
        kraken_asset(instrument.quote())
    )
}

pub fn decimal_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(text) => text.parse().ok(),
        Value::Number(number) => number.to_string().parse().ok(),
        _ => None,
    }
}

/// Kraken sends seconds with a fractional part, as a string or a number.
pub fn seconds_to_millis(value: &Value) -> Option<u64> {
    (decimal_field(value)? * Decimal::ONE_THOUSAND).trunc().to_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn maps_bitcoin_to_xbt() {
        let instrument = Instrument::new("BTC", "USD");
        assert_eq!(ws_pair(&instrument), "XBT/USD");
        assert_eq!(rest_pair(&instrument), "XBTUSD");

        let instrument = Instrument::new("ETH", "USDT");
        assert_eq!(ws_pair(&instrument), "ETH/USDT");
        assert_eq!(rest_pair(&instrument), "ETHUSDT");
    }

    #[test]
    fn parses_numeric_fields() {
        assert_eq!(decimal_field(&json!("3586.70000")), Some(dec!(3586.7)));
        assert_eq!(decimal_field(&json!(42)), Some(dec!(42)));
        assert_eq!(decimal_field(&json!(null)), None);
        assert_eq!(seconds_to_millis(&json!("1542057314.748456")), Some(1_542_057_314_748));
        assert_eq!(seconds_to_millis(&json!(1688671200)), Some(1_688_671_200_000));
    }
}
