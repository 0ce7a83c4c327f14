use chrono::{TimeZone, Utc};
use tracing::debug;

use common::{Candle, Error, Result, SignalKind, Trend};

use crate::detector::detect;
use crate::indicators::EmaIndicator;
use crate::settings::StrategySettings;

/// Build the live advisory text for a freshly fetched series.
///
/// Single-shot use of the gap detector: the last candle may still be in
/// progress, so detection runs at `len - 2` (the most recent closed candle
/// against the one two positions back). The trend line compares the latest
/// close to the long-period EMA. No simulation, no equity tracking — this
/// path never creates trades.
pub fn build_advisory(series: &[Candle], settings: &StrategySettings) -> Result<String> {
    if series.len() < 4 {
        return Err(Error::InsufficientData {
            needed: 4,
            got: series.len(),
        });
    }

    let latest = &series[series.len() - 1];
    let closes: Vec<f64> = series.iter().map(|c| c.close).collect();

    let Some(ema) = EmaIndicator::new(settings.ema_period).compute(&closes) else {
        return Err(Error::InsufficientData {
            needed: 4,
            got: series.len(),
        });
    };
    let trend = if latest.close > ema {
        Trend::Bullish
    } else {
        Trend::Bearish
    };

    let signal = detect(series, series.len() - 2, settings);
    debug!(symbol = %settings.symbol, trend = %trend, signal = signal.is_some(), "Advisory computed");

    let when = Utc
        .timestamp_millis_opt(latest.open_time)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown time".to_string());

    let mut report = format!(
        "{} — {}\n\
         Current price: ${:.2}\n\
         Market trend (EMA {}): {}\n\
         ----------------------\n",
        settings.symbol, when, latest.close, settings.ema_period, trend
    );

    match signal {
        Some(sig) => {
            let (headline, entry_label) = match sig.kind {
                SignalKind::Long => ("Bullish FVG detected", "Entry (buy limit)"),
                SignalKind::Short => ("Bearish FVG detected", "Entry (sell limit)"),
            };
            report.push_str(&format!(
                "{headline}\n\
                 {entry_label}: ${:.2}\n\
                 Stop loss: ${:.2}\n\
                 Take profit: ${:.2}\n\
                 Gap size: ${:.2}\n\
                 Risk/reward: 1:{}\n\
                 Price may revisit the gap zone. Watch for an entry.",
                sig.entry, sig.stop, sig.target, sig.gap_size, settings.risk_reward
            ));
        }
        None => {
            report.push_str("No clear FVG signal right now. Standing aside.");
        }
    }

    Ok(report)
}
