use serde::{Deserialize, Serialize};

/// One OHLC candle from the exchange.
///
/// Candles are immutable once ingested and always handled as a strictly
/// chronological slice (`open_time` ascending). Detection and simulation
/// both index into that slice, so the order must never change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time in milliseconds since the Unix epoch.
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Direction of a fair value gap signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Long,
    Short,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Long => write!(f, "LONG"),
            SignalKind::Short => write!(f, "SHORT"),
        }
    }
}

/// A qualified fair value gap emitted by the detector.
///
/// `origin_index` is the position of the later of the two candles compared
/// (the candle whose low/high forms the near edge of the gap).
///
/// Level invariants: Long has `stop < entry < target`, Short has
/// `target < entry < stop`, and `gap_size > 0` always.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub origin_index: usize,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub gap_size: f64,
}

/// Result of simulating a signal forward through the lookahead window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
    /// Neither stop nor target was touched within the window. Unresolved
    /// signals are discarded and never become trades.
    Unresolved,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Loss => write!(f, "LOSS"),
            Outcome::Unresolved => write!(f, "UNRESOLVED"),
        }
    }
}

/// A signal that reached a decisive outcome within its window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub origin_index: usize,
    pub kind: SignalKind,
    pub outcome: Outcome,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
}

/// Summary statistics reduced from the trade list and equity trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub wins: u32,
    pub losses: u32,
    pub total_trades: u32,
    /// Percentage in `[0, 100]`; `0.0` when there are no resolved trades.
    pub win_rate: f64,
    pub initial_balance: f64,
    pub final_balance: f64,
}

/// Market direction relative to the long-period EMA, used by the advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Bearish => write!(f, "bearish"),
        }
    }
}
