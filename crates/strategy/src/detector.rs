use common::{Candle, Signal, SignalKind};

use crate::settings::StrategySettings;

/// Fair value gap detection at a single series position.
///
/// Compares the candle at index `i` against the candle at `i - 2`. A bullish
/// gap exists when `low[i] > high[i-2]`, a bearish gap when
/// `high[i] < low[i-2]`; the conditions are mutually exclusive and bullish is
/// checked first. The gap only qualifies when its size, normalized by
/// `close[i]`, exceeds `settings.threshold`.
///
/// Entry sits at the far edge of the gap (the level price would revisit),
/// stop at the opposite extreme of the origin candle, and the target at
/// `risk_reward` times the initial risk beyond entry.
///
/// Pure function of its inputs. Returns `None` when `i < 2`, when there is
/// no gap, or when the gap fails the threshold test.
pub fn detect(series: &[Candle], i: usize, settings: &StrategySettings) -> Option<Signal> {
    if i < 2 || i >= series.len() {
        return None;
    }

    let current = &series[i];
    let origin = &series[i - 2];

    // Bullish gap: current low clears the origin high
    if current.low > origin.high {
        let gap = current.low - origin.high;
        if gap / current.close > settings.threshold {
            let entry = origin.high;
            let stop = origin.low;
            let risk = entry - stop;
            return Some(Signal {
                kind: SignalKind::Long,
                origin_index: i,
                entry,
                stop,
                target: entry + risk * settings.risk_reward,
                gap_size: gap,
            });
        }
    // Bearish gap: current high stays under the origin low
    } else if current.high < origin.low {
        let gap = origin.low - current.high;
        if gap / current.close > settings.threshold {
            let entry = origin.low;
            let stop = origin.high;
            let risk = stop - entry;
            return Some(Signal {
                kind: SignalKind::Short,
                origin_index: i,
                entry,
                stop,
                target: entry - risk * settings.risk_reward,
                gap_size: gap,
            });
        }
    }

    None
}
