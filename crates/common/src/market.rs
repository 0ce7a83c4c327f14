use async_trait::async_trait;

use crate::{Candle, Result};

/// Abstraction over the market data source.
///
/// `BinanceClient` in `crates/market` implements this for live data. The
/// backtest and advisory drivers only ever see a fully fetched, validated
/// candle slice — a failed or partial fetch never reaches the core.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch up to `limit` candles for `symbol` at `interval`, oldest first.
    async fn klines(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Candle>>;
}
