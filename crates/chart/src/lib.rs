use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use common::{Error, Result};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;
const LINE_COLOR: RGBColor = RGBColor(0, 80, 200);

/// Render the equity trajectory as a PNG line chart.
///
/// X axis is the trade count (the trajectory holds the seed balance plus one
/// point per resolved trade), Y axis the account balance. Needs at least two
/// points — a run with zero trades has nothing to draw.
///
/// Rendering is a reporting convenience: callers must treat a failure here
/// as non-fatal, the statistics are already computed by the time this runs.
pub fn render_equity_curve(equity_curve: &[f64], win_rate: f64, path: &Path) -> Result<()> {
    if equity_curve.len() < 2 {
        return Err(Error::Render(format!(
            "equity curve needs at least 2 points, got {}",
            equity_curve.len()
        )));
    }

    let y_min = equity_curve.iter().cloned().fold(f64::INFINITY, f64::min);
    let y_max = equity_curve.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    // Pad the range so a flat-ish curve does not hug the borders
    let pad = ((y_max - y_min) * 0.05).max(1.0);

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::Render(e.to_string()))?;

    let x_max = (equity_curve.len() - 1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Backtest equity curve (win rate: {win_rate:.2}%)"),
            ("sans-serif", 28),
        )
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, (y_min - pad)..(y_max + pad))
        .map_err(|e| Error::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Number of trades")
        .y_desc("Balance (USD)")
        .light_line_style(&RGBColor(220, 220, 220))
        .draw()
        .map_err(|e| Error::Render(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            equity_curve.iter().enumerate().map(|(i, &b)| (i as f64, b)),
            LINE_COLOR.stroke_width(2),
        ))
        .map_err(|e| Error::Render(e.to_string()))?
        .label("Account balance ($)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &LINE_COLOR));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| Error::Render(e.to_string()))?;

    root.present().map_err(|e| Error::Render(e.to_string()))?;
    info!(path = %path.display(), points = equity_curve.len(), "Equity curve saved");
    Ok(())
}
