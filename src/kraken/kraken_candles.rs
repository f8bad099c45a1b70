use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::candles::{candle::Candle, candle_history::CandleHistory, candle_interval::CandleInterval};
use crate::kraken::utils::{decimal_field, rest_pair, seconds_to_millis};
use crate::types::instrument::Instrument;

/// Public OHLC history over Kraken's REST api. Kraken caps a response at
/// 720 bars.
#[derive(Debug)]
pub struct KrakenCandles {
    client: reqwest::Client,
    base_url: String,
}

impl Default for KrakenCandles {
    fn default() -> Self {
        Self::new("https://api.kraken.com")
    }
}

impl KrakenCandles {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn ohlc_url(&self, instrument: &Instrument, interval: CandleInterval) -> Result<Url> {
        let url = Url::parse_with_params(
            &format!("{}/0/public/OHLC", self.base_url),
            &[
                ("pair", rest_pair(instrument)),
                ("interval", interval.as_minutes().to_string()),
            ],
        )?;

        Ok(url)
    }
}

/// Response shape: `{"error": [], "result": {"<PAIR>": [[time, open, high,
/// low, close, vwap, volume, count], ...], "last": <id>}}`.
pub fn parse_ohlc_response(response: &Value, limit: usize) -> Result<Vec<Candle>> {
    if let Some(errors) = response.get("error").and_then(Value::as_array) {
        if !errors.is_empty() {
            bail!("kraken OHLC error: {errors:?}");
        }
    }

    let result = response
        .get("result")
        .and_then(Value::as_object)
        .ok_or_else(|| anyhow!("no result in OHLC response: {response}"))?;

    let rows = result
        .iter()
        .find(|(key, _)| key.as_str() != "last")
        .and_then(|(_, rows)| rows.as_array())
        .ok_or_else(|| anyhow!("no OHLC rows in response"))?;

    let mut candles = rows
        .iter()
        .map(parse_row)
        .collect::<Result<Vec<_>>>()?;

    candles.sort_by_key(|candle| candle.open_time_ms);
    let skip = candles.len().saturating_sub(limit);

    Ok(candles.split_off(skip))
}

fn parse_row(row: &Value) -> Result<Candle> {
    let fields = row
        .as_array()
        .ok_or_else(|| anyhow!("OHLC row is not an array: {row}"))?;

    let field = |index: usize| {
        fields
            .get(index)
            .and_then(decimal_field)
            .ok_or_else(|| anyhow!("bad OHLC field {index} in {row}"))
    };

    Ok(Candle {
        open_time_ms: fields
            .first()
            .and_then(seconds_to_millis)
            .ok_or_else(|| anyhow!("bad OHLC time in {row}"))?,
        open: field(1)?,
        high: field(2)?,
        low: field(3)?,
        close: field(4)?,
        volume: field(6)?,
    })
}

#[async_trait]
impl CandleHistory for KrakenCandles {
    async fn fetch(
        &self,
        instrument: &Instrument,
        interval: CandleInterval,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let url = self.ohlc_url(instrument, interval)?;
        debug!(%url, "fetching candle history");

        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
            .context("decoding OHLC response")?;

        parse_ohlc_response(&response, limit)
            .with_context(|| format!("loading {interval} candles for {instrument}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn response() -> Value {
        json!({
            "error": [],
            "result": {
                "ETHUSDT": [
                    [1688671080, "1900.1", "1901.0", "1899.5", "1900.5", "1900.2", "3.2", 12],
                    [1688671140, "1900.5", "1902.0", "1900.0", "1901.5", "1901.1", "1.5", 7],
                    [1688671200, "1901.5", "1901.9", "1900.8", "1901.0", "1901.3", "0.4", 3]
                ],
                "last": 1688671140
            }
        })
    }

    #[test]
    fn builds_ohlc_url() {
        let url = KrakenCandles::default()
            .ohlc_url(&Instrument::new("BTC", "USD"), CandleInterval::FifteenMinutes)
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.kraken.com/0/public/OHLC?pair=XBTUSD&interval=15"
        );
    }

    #[test]
    fn parses_rows_oldest_first() {
        let candles = parse_ohlc_response(&response(), 10).unwrap();

        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].open_time_ms, 1_688_671_080_000);
        assert_eq!(candles[0].high, dec!(1901));
        assert_eq!(candles[0].volume, dec!(3.2));
        assert_eq!(candles[2].close, dec!(1901));
    }

    #[test]
    fn keeps_only_most_recent_rows() {
        let candles = parse_ohlc_response(&response(), 2).unwrap();

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].open_time_ms, 1_688_671_140_000);
    }

    #[test]
    fn surfaces_api_errors() {
        let error = parse_ohlc_response(&json!({"error": ["EQuery:Unknown asset pair"]}), 10)
            .unwrap_err();

        assert!(error.to_string().contains("Unknown asset pair"));
    }
}
