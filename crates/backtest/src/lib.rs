pub mod ledger;
pub mod report;
pub mod sim;

pub use ledger::EquityLedger;
pub use report::{format_report, summarize};
pub use sim::simulate;

use tracing::{debug, info};

use common::{Candle, Error, Outcome, Report, Result, Trade};
use strategy::{detect, StrategySettings};

/// Everything a finished backtest produces: the resolved trades, the equity
/// trajectory (seed point plus one point per trade), and the reduced report.
#[derive(Debug, Clone)]
pub struct BacktestRun {
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<f64>,
    pub report: Report,
}

/// Full historical sweep: detect at every position, simulate each signal
/// forward, fold resolved outcomes into the ledger, and reduce to a report.
///
/// The sweep starts at index 2 (the detector needs two candles of history)
/// and stops where a full lookahead window no longer fits; trailing
/// positions without one are skipped, not an error. A series too short to
/// evaluate any position at all is rejected up front — the ledger is never
/// partially populated from bad input.
///
/// Pure, synchronous computation over the in-memory series.
pub fn run(series: &[Candle], settings: &StrategySettings) -> Result<BacktestRun> {
    let needed = settings.lookahead + 3;
    if series.len() < needed {
        return Err(Error::InsufficientData {
            needed,
            got: series.len(),
        });
    }

    info!(
        candles = series.len(),
        threshold = settings.threshold,
        risk_reward = settings.risk_reward,
        "Starting backtest sweep"
    );

    let mut trades = Vec::new();
    let mut ledger = EquityLedger::new(settings.initial_balance);

    // Last evaluable position: i + lookahead must still be in range
    for i in 2..series.len() - settings.lookahead {
        let Some(signal) = detect(series, i, settings) else {
            continue;
        };

        let outcome = simulate(series, &signal, settings.lookahead);
        if outcome == Outcome::Unresolved {
            // Never touched stop nor target — drop it from the statistics
            debug!(index = i, kind = %signal.kind, "Signal unresolved, discarded");
            continue;
        }

        trades.push(Trade {
            origin_index: signal.origin_index,
            kind: signal.kind,
            outcome,
            entry: signal.entry,
            stop: signal.stop,
            target: signal.target,
        });
        let balance = ledger.apply(outcome, settings.risk_percent, settings.risk_reward);
        debug!(index = i, kind = %signal.kind, outcome = %outcome, balance, "Trade resolved");
    }

    let equity_curve = ledger.into_curve();
    let report = summarize(&trades, &equity_curve, settings.initial_balance);
    info!(
        trades = report.total_trades,
        win_rate = report.win_rate,
        final_balance = report.final_balance,
        "Backtest complete"
    );

    Ok(BacktestRun {
        trades,
        equity_curve,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(high: f64, low: f64, close: f64) -> Candle {
        Candle {
            open_time: 0,
            open: (high + low) / 2.0,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    fn flat(n: usize) -> Vec<Candle> {
        vec![candle(100.0, 99.5, 99.8); n]
    }

    fn settings_with_lookahead(lookahead: usize) -> StrategySettings {
        StrategySettings {
            lookahead,
            ..StrategySettings::default()
        }
    }

    #[test]
    fn too_short_series_is_rejected() {
        let settings = settings_with_lookahead(48);
        let err = run(&flat(50), &settings).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { needed: 51, got: 50 }));
    }

    #[test]
    fn quiet_series_produces_empty_report() {
        let settings = settings_with_lookahead(48);
        let result = run(&flat(200), &settings).unwrap();
        assert!(result.trades.is_empty());
        assert_eq!(result.equity_curve, vec![1000.0]);
        assert_eq!(result.report.total_trades, 0);
        assert!((result.report.win_rate - 0.0).abs() < f64::EPSILON);
        assert!((result.report.final_balance - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn winning_gap_moves_the_balance_up() {
        // Gap at i=2 (Long: entry 100, stop 99, target 101.5), then the next
        // candle runs to the target without touching the stop. The tail
        // overlaps the spike so it produces no further gaps.
        let mut series = vec![
            candle(100.0, 99.0, 99.5),
            candle(102.0, 100.0, 101.0),
            candle(105.0, 104.0, 104.0),
            candle(106.0, 101.0, 105.0), // high >= 101.5 → win
        ];
        series.extend(vec![candle(105.5, 103.5, 104.5); 20]);
        let settings = settings_with_lookahead(5);

        let result = run(&series, &settings).unwrap();
        assert_eq!(result.trades.len(), 1);
        assert_eq!(result.trades[0].outcome, Outcome::Win);
        assert_eq!(result.equity_curve.len(), 2);
        assert!((result.report.final_balance - 1030.0).abs() < 1e-9);
        assert!((result.report.win_rate - 100.0).abs() < 1e-9);
    }

    #[test]
    fn losing_gap_moves_the_balance_down() {
        // Same gap, but the next candle breaches the stop first.
        let mut series = vec![
            candle(100.0, 99.0, 99.5),
            candle(102.0, 100.0, 101.0),
            candle(105.0, 104.0, 104.0),
            candle(104.0, 98.5, 99.0), // low <= 99 → loss
        ];
        series.extend(vec![candle(104.5, 99.5, 102.0); 20]);
        let settings = settings_with_lookahead(5);

        let result = run(&series, &settings).unwrap();
        assert_eq!(result.trades.len(), 1);
        assert_eq!(result.trades[0].outcome, Outcome::Loss);
        assert!((result.report.final_balance - 980.0).abs() < 1e-9);
        assert!((result.report.win_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unresolved_signal_leaves_no_trace() {
        // A wide risk/reward pushes the target out of reach, so the signal
        // never resolves within the window and must leave no trade, no
        // equity point and no effect on the report.
        let mut series = vec![
            candle(100.0, 99.0, 99.5),
            candle(102.0, 100.0, 101.0),
            candle(105.0, 104.0, 104.0), // Long: entry 100, stop 99, target 110
        ];
        series.extend(vec![candle(104.8, 101.9, 103.0); 20]);
        let settings = StrategySettings {
            lookahead: 5,
            risk_reward: 10.0,
            ..StrategySettings::default()
        };

        let result = run(&series, &settings).unwrap();
        assert!(result.trades.is_empty());
        assert_eq!(result.equity_curve.len(), 1);
        assert_eq!(result.report.total_trades, 0);
    }

    #[test]
    fn trailing_positions_without_full_window_are_skipped() {
        // Place a qualifying gap so late that no full lookahead window fits
        // after it — it must not be evaluated at all.
        let mut series = flat(60);
        let n = series.len();
        series[n - 3] = candle(100.0, 99.0, 99.5);
        series[n - 1] = candle(105.0, 104.0, 104.0);
        let settings = settings_with_lookahead(48);

        let result = run(&series, &settings).unwrap();
        assert!(result.trades.is_empty());
    }

    #[test]
    fn equity_curve_length_tracks_resolved_trades() {
        // A bullish gap resolved as a win, then a bearish gap resolved as a
        // loss, bridged by overlapping candles that emit no signals.
        let mut series = vec![
            candle(100.0, 99.0, 99.5),
            candle(102.0, 100.0, 101.0),
            candle(105.0, 104.0, 104.0), // Long: entry 100, stop 99, target 101.5
            candle(106.0, 101.0, 105.0), // win
        ];
        series.extend(vec![candle(105.5, 103.5, 104.5); 4]);
        series.extend(vec![
            candle(104.0, 103.0, 103.5),
            candle(103.5, 102.5, 103.0),
            candle(100.0, 99.0, 99.5),   // bearish gap vs i=8 → Short: entry 103, stop 104
            candle(104.5, 102.0, 103.0), // high >= 104 → loss
        ]);
        series.extend(vec![candle(103.0, 99.5, 101.0); 20]);
        let settings = settings_with_lookahead(5);

        let result = run(&series, &settings).unwrap();
        assert_eq!(result.trades.len(), 2);
        assert_eq!(result.trades[0].outcome, Outcome::Win);
        assert_eq!(result.trades[1].outcome, Outcome::Loss);
        assert_eq!(result.equity_curve.len(), 1 + result.trades.len());
        assert!((result.report.final_balance - 1030.0 * 0.98).abs() < 1e-9);
    }
}
