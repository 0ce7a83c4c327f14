/// Exponential Moving Average, used as the advisory trend filter.
///
/// Recursive form seeded with the first value: `ema[0] = close[0]`,
/// `ema[t] = alpha * close[t] + (1 - alpha) * ema[t-1]` with
/// `alpha = 2 / (period + 1)`. The value is defined for any non-empty input;
/// with fewer than `period` closes it is simply weighted toward the early
/// samples rather than undefined.
#[derive(Debug, Clone)]
pub struct EmaIndicator {
    pub period: usize,
}

impl EmaIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self { period }
    }

    /// Compute the latest EMA value from a slice of close prices (oldest
    /// first). Returns `None` only for an empty slice.
    pub fn compute(&self, closes: &[f64]) -> Option<f64> {
        let (&first, rest) = closes.split_first()?;
        let alpha = 2.0 / (self.period as f64 + 1.0);

        let mut ema = first;
        for &price in rest {
            ema = price * alpha + ema * (1.0 - alpha);
        }
        Some(ema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_returns_none_on_empty_input() {
        let ema = EmaIndicator::new(200);
        assert!(ema.compute(&[]).is_none());
    }

    #[test]
    fn ema_of_single_value_is_that_value() {
        let ema = EmaIndicator::new(200);
        let value = ema.compute(&[42.0]).unwrap();
        assert!((value - 42.0).abs() < 1e-12);
    }

    #[test]
    fn ema_of_constant_series_is_the_constant() {
        let ema = EmaIndicator::new(10);
        let closes = vec![100.0; 50];
        let value = ema.compute(&closes).unwrap();
        assert!((value - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ema_tracks_below_a_rising_series() {
        let ema = EmaIndicator::new(10);
        let closes: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
        let value = ema.compute(&closes).unwrap();
        let last = *closes.last().unwrap();
        assert!(value < last, "EMA {value} should lag below last close {last}");
        assert!(value > closes[0]);
    }

    #[test]
    fn ema_matches_hand_computed_recurrence() {
        // period 3 → alpha 0.5
        let ema = EmaIndicator::new(3);
        let value = ema.compute(&[2.0, 4.0, 8.0]).unwrap();
        // 2 → 0.5*4 + 0.5*2 = 3 → 0.5*8 + 0.5*3 = 5.5
        assert!((value - 5.5).abs() < 1e-12);
    }
}
