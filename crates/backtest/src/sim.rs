use common::{Candle, Outcome, Signal, SignalKind};

/// Classify a signal by scanning forward price action.
///
/// Walks the candles strictly after `signal.origin_index`, up to `lookahead`
/// of them, in chronological order, stopping at the first decisive touch.
/// The stop is always checked before the target: a candle touching both in
/// the same bar resolves as a loss, since intrabar ordering is unknown and
/// counting it as a win would overstate performance.
///
/// Exhausting the window — by lookahead or by running off the end of the
/// series — yields `Unresolved`.
pub fn simulate(series: &[Candle], signal: &Signal, lookahead: usize) -> Outcome {
    let start = signal.origin_index + 1;
    let end = start.saturating_add(lookahead).min(series.len());

    for future in &series[start.min(series.len())..end] {
        match signal.kind {
            SignalKind::Long => {
                if future.low <= signal.stop {
                    return Outcome::Loss;
                } else if future.high >= signal.target {
                    return Outcome::Win;
                }
            }
            SignalKind::Short => {
                if future.high >= signal.stop {
                    return Outcome::Loss;
                } else if future.low <= signal.target {
                    return Outcome::Win;
                }
            }
        }
    }

    Outcome::Unresolved
}
