use anyhow::Result;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::sync::mpsc::Sender;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use crate::candles::{candle::Candle, candle_interval::CandleInterval};
use crate::events::MarketEvent;
use crate::kraken::utils::{decimal_field, seconds_to_millis, ws_pair};
use crate::market::market_source::MarketDataSource;
use crate::types::instrument::Instrument;
use crate::types::price::Price;

#[derive(Debug)]
pub struct KrakenMarket {
    websocket_url: String,
}

impl Default for KrakenMarket {
    fn default() -> Self {
        Self::new("wss://ws.kraken.com")
    }
}

impl KrakenMarket {
    pub fn new(websocket_url: impl Into<String>) -> Self {
        Self {
            websocket_url: websocket_url.into(),
        }
    }

    fn subscriptions(instrument: &Instrument, interval: CandleInterval) -> Vec<Value> {
        let pair = ws_pair(instrument);

        vec![
            json!({
                "event": "subscribe",
                "pair": [pair],
                "subscription": { "name": "spread" }
            }),
            json!({
                "event": "subscribe",
                "pair": [pair],
                "subscription": { "name": "trade" }
            }),
            json!({
                "event": "subscribe",
                "pair": [pair],
                "subscription": { "name": "ohlc", "interval": interval.as_minutes() }
            }),
        ]
    }

    fn parse_market_event_from_text(
        instrument: &Instrument,
        interval: CandleInterval,
        text: &str,
    ) -> Option<MarketEvent> {
        let parsed: Value = serde_json::from_str(text).ok()?;

        /* heartbeat, systemStatus and subscriptionStatus arrive as objects */
        if let Some(object) = parsed.as_object() {
            if object.get("status").and_then(Value::as_str) == Some("error") {
                warn!(message = ?object.get("errorMessage"), "kraken subscription error");
            }
            return None;
        }

        /* [channel_id, payload, channel_name, pair] */
        let array = parsed.as_array()?;
        if array.len() < 4 {
            return None;
        }

        let channel_name = array[2].as_str()?;
        let payload = &array[1];

        match channel_name {
            "trade" => Self::parse_trade(instrument, payload),
            "spread" => Self::parse_spread_top_of_book(instrument, payload),
            name if name.starts_with("ohlc") => Self::parse_ohlc(instrument, interval, payload),
            _ => {
                error!("Kraken websocket received unknown channel: {channel_name}");

                None
            }
        }
    }

    /* [[price, volume, time, side, order_type, misc], ...], newest last */
    fn parse_trade(instrument: &Instrument, payload: &Value) -> Option<MarketEvent> {
        let trades = payload.as_array()?;
        let last_trade = trades.last()?.as_array()?;

        let price = decimal_field(last_trade.first()?)?;
        let quantity = decimal_field(last_trade.get(1)?)?;
        let timestamp_ms = last_trade.get(2).and_then(seconds_to_millis).unwrap_or(0);

        Some(MarketEvent::Trade {
            instrument: instrument.clone(),
            price: Price::try_new(price)?,
            quantity,
            timestamp_ms,
        })
    }

    /* [bid, ask, time, bid_volume, ask_volume] */
    fn parse_spread_top_of_book(instrument: &Instrument, payload: &Value) -> Option<MarketEvent> {
        let fields = payload.as_array()?;

        let best_bid = decimal_field(fields.first()?)?;
        let best_ask = decimal_field(fields.get(1)?)?;
        let timestamp_ms = fields.get(2).and_then(seconds_to_millis).unwrap_or(0);

        Some(MarketEvent::TopOfBook {
            instrument: instrument.clone(),
            best_bid: Price::try_new(best_bid)?,
            best_ask: Price::try_new(best_ask)?,
            timestamp_ms,
        })
    }

    /* [time, end_time, open, high, low, close, vwap, volume, count] */
    fn parse_ohlc(
        instrument: &Instrument,
        interval: CandleInterval,
        payload: &Value,
    ) -> Option<MarketEvent> {
        let fields = payload.as_array()?;

        let end_time_ms = seconds_to_millis(fields.get(1)?)?;
        let candle = Candle {
            open_time_ms: end_time_ms.checked_sub(interval.as_millis())?,
            open: decimal_field(fields.get(2)?)?,
            high: decimal_field(fields.get(3)?)?,
            low: decimal_field(fields.get(4)?)?,
            close: decimal_field(fields.get(5)?)?,
            volume: decimal_field(fields.get(7)?)?,
        };

        Some(MarketEvent::Candle {
            instrument: instrument.clone(),
            candle,
        })
    }
}

#[async_trait]
impl MarketDataSource for KrakenMarket {
    async fn stream(
        &self,
        instrument: &Instrument,
        candle_interval: CandleInterval,
        channel: Sender<MarketEvent>,
    ) -> Result<()> {
        let (stream, _http_response) = connect_async(&self.websocket_url).await?;
        let (mut writer, mut reader) = stream.split();

        for subscription in Self::subscriptions(instrument, candle_interval) {
            writer.send(Message::Text(subscription.to_string())).await?;
        }

        info!(pair = %ws_pair(instrument), interval = %candle_interval, "Kraken websocket connected");

        while let Some(message) = reader.next().await {
            let message_text: Option<String> = match message? {
                Message::Text(text) => Some(text),
                Message::Binary(binary) => String::from_utf8(binary).ok(),
                Message::Ping(_) | Message::Pong(_) => None,
                Message::Close(frame) => {
                    error!("Kraken websocket closed: {:?}", frame);
                    break;
                }
                _ => None,
            };

            let Some(text) = message_text else {
                continue;
            };

            match Self::parse_market_event_from_text(instrument, candle_interval, &text) {
                Some(market_event) => {
                    if channel.send(market_event).await.is_err() {
                        error!("Failed to send market event");

                        break;
                    }
                }
                None => debug!(%text, "ignored kraken message"),
            }
        }

        Ok(())
    }
}
