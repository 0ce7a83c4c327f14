use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use common::{Candle, Error, MarketData, Result};

const BASE_URL: &str = "https://api.binance.com";

/// REST client for the public Binance klines endpoint.
///
/// The endpoint is unsigned, so no credentials are involved. Every payload
/// is fully parsed and validated here; the core pipeline only ever receives
/// a complete, chronological candle series.
pub struct BinanceClient {
    http: Client,
}

impl BinanceClient {
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .use_rustls_tls()
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketData for BinanceClient {
    async fn klines(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Candle>> {
        let url = format!(
            "{BASE_URL}/api/v3/klines?symbol={symbol}&interval={interval}&limit={limit}"
        );

        debug!(symbol, interval, limit, "Fetching klines from Binance");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Exchange(format!("HTTP {status}: {body}")));
        }

        parse_klines(&body)
    }
}

/// Parse the raw klines payload into candles.
///
/// Binance returns an array of 12-element arrays mixing integer timestamps
/// and decimal strings:
/// `[open_time, open, high, low, close, volume, close_time, q_vol,
///   num_trades, t_base, t_quote, ignore]`.
///
/// Fails fast on any missing, non-numeric or non-finite OHLCV field and on
/// out-of-order open times; nothing partial gets through.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)
        .map_err(|e| Error::InvalidData(format!("klines payload is not an array of rows: {e}")))?;

    let mut candles = Vec::with_capacity(rows.len());
    let mut prev_open_time = i64::MIN;

    for (i, row) in rows.iter().enumerate() {
        if row.len() < 6 {
            return Err(Error::InvalidData(format!(
                "kline row {i} has {} fields, expected at least 6",
                row.len()
            )));
        }

        let open_time = row[0].as_i64().ok_or_else(|| {
            Error::InvalidData(format!("kline row {i}: open_time is not an integer"))
        })?;
        if open_time <= prev_open_time {
            return Err(Error::InvalidData(format!(
                "kline row {i}: open_time {open_time} out of chronological order"
            )));
        }
        prev_open_time = open_time;

        let candle = Candle {
            open_time,
            open: price_field(row, i, 1, "open")?,
            high: price_field(row, i, 2, "high")?,
            low: price_field(row, i, 3, "low")?,
            close: price_field(row, i, 4, "close")?,
            volume: price_field(row, i, 5, "volume")?,
        };
        candles.push(candle);
    }

    Ok(candles)
}

/// Binance encodes prices as decimal strings; tolerate plain numbers too.
fn price_field(row: &[Value], row_idx: usize, field_idx: usize, name: &str) -> Result<f64> {
    let value = match &row[field_idx] {
        Value::String(s) => s.parse::<f64>().map_err(|_| {
            Error::InvalidData(format!("kline row {row_idx}: {name} '{s}' is not numeric"))
        })?,
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            Error::InvalidData(format!("kline row {row_idx}: {name} is not representable"))
        })?,
        other => {
            return Err(Error::InvalidData(format!(
                "kline row {row_idx}: {name} has unexpected type: {other}"
            )))
        }
    };

    if !value.is_finite() {
        return Err(Error::InvalidData(format!(
            "kline row {row_idx}: {name} is not finite"
        )));
    }
    Ok(value)
}
