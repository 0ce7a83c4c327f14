use serde::{Deserialize, Serialize};

/// Strategy parameters loaded from a TOML file.
///
/// Every field has a default matching the reference run, so an empty file is
/// a valid configuration. All parameters are passed explicitly into the
/// detector, simulator and ledger — there are no module-level constants.
///
/// Example `config/strategy.toml`:
/// ```toml
/// symbol = "BTCUSDT"
/// interval = "30m"
/// candle_limit = 3000
/// threshold = 0.001
/// risk_reward = 1.5
/// risk_percent = 0.02
/// lookahead = 48
/// initial_balance = 1000.0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategySettings {
    /// Trading pair, e.g. "BTCUSDT".
    pub symbol: String,
    /// Kline interval for the historical backtest, e.g. "30m".
    pub interval: String,
    /// Candles fetched for the full backtest sweep.
    pub candle_limit: u32,
    /// Candles fetched for a single live advisory check.
    pub advisory_limit: u32,
    /// Minimum gap-to-price ratio for a gap to qualify as a signal.
    pub threshold: f64,
    /// Multiple of the initial risk used to place the target.
    pub risk_reward: f64,
    /// Fraction of the current balance risked per trade.
    pub risk_percent: f64,
    /// Future candles scanned before a signal is abandoned as unresolved.
    pub lookahead: usize,
    /// Seed balance for the equity trajectory.
    pub initial_balance: f64,
    /// EMA span for the advisory trend filter.
    pub ema_period: usize,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            interval: "30m".to_string(),
            candle_limit: 3000,
            advisory_limit: 100,
            threshold: 0.001,
            risk_reward: 1.5,
            risk_percent: 0.02,
            lookahead: 48,
            initial_balance: 1000.0,
            ema_period: 200,
        }
    }
}

impl StrategySettings {
    /// Load from a TOML file. Exits process on error.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read strategy config at '{path}': {e}"));
        toml::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse strategy config at '{path}': {e}"))
    }
}
