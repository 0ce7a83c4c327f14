use common::{Outcome, Report, Trade};

/// Reduce the trade list and equity trajectory into summary statistics.
///
/// Pure and stateless. `initial_balance` doubles as the final balance when
/// nothing traded (an empty or seed-only trajectory).
pub fn summarize(trades: &[Trade], equity_curve: &[f64], initial_balance: f64) -> Report {
    let wins = trades.iter().filter(|t| t.outcome == Outcome::Win).count() as u32;
    let losses = trades.iter().filter(|t| t.outcome == Outcome::Loss).count() as u32;
    let total_trades = wins + losses;

    let win_rate = if total_trades > 0 {
        wins as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };

    Report {
        wins,
        losses,
        total_trades,
        win_rate,
        initial_balance,
        final_balance: equity_curve.last().copied().unwrap_or(initial_balance),
    }
}

/// Human-readable report block, sent as the Telegram reply.
pub fn format_report(report: &Report, symbol: &str, interval: &str) -> String {
    format!(
        "==============================\n\
         Backtest report — {symbol} ({interval})\n\
         ==============================\n\
         Total trades: {}\n\
         Wins: {}\n\
         Losses: {}\n\
         Win rate: {:.2}%\n\
         Final balance: ${:.2} (initial ${:.2})\n\
         ==============================",
        report.total_trades,
        report.wins,
        report.losses,
        report.win_rate,
        report.final_balance,
        report.initial_balance,
    )
}
