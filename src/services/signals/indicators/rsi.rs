//! Relative Strength Index (RSI) indicator.

use crate::types::{IndicatorValue, PriceSeries};

/// RSI read when the latest value is undefined.
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// Gains and losses are averaged with a rolling simple mean over the last
/// `period` deltas rather than Wilder's exponential smoothing.
#[derive(Debug, Clone, Copy)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Number of closes needed before the first value is defined.
    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    /// RSI for every close, aligned by index.
    ///
    /// Entry `i` is `None` while fewer than `period` deltas precede it.
    pub fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let period = self.period;
        let mut values = vec![None; closes.len()];
        if period == 0 || closes.len() < self.min_periods() {
            return values;
        }

        // gains[k], losses[k] belong to the delta ending at close k + 1
        let (gains, losses): (Vec<f64>, Vec<f64>) = closes
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        for i in period..closes.len() {
            let window = i - period..i;
            let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
            let avg_loss = losses[window].iter().sum::<f64>() / period as f64;
            values[i] = Some(rsi_from_averages(avg_gain, avg_loss));
        }

        values
    }

    /// RSI for a series, one entry per price point.
    pub fn compute(&self, series: &PriceSeries) -> Vec<IndicatorValue> {
        let values = self.calculate(&series.closes());
        series
            .points()
            .iter()
            .zip(values)
            .map(|(point, rsi)| IndicatorValue {
                date: point.date,
                rsi,
            })
            .collect()
    }
}

/// Convert average gain/loss to RSI; zero average loss is 100.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// RSI over `window` for every point of `series`.
pub fn compute_rsi(series: &PriceSeries, window: usize) -> Vec<IndicatorValue> {
    Rsi::new(window).compute(series)
}

/// Latest RSI, or [`NEUTRAL_RSI`] when the latest value is undefined.
pub fn current_rsi(values: &[IndicatorValue]) -> f64 {
    values
        .last()
        .and_then(|v| v.rsi)
        .unwrap_or(NEUTRAL_RSI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PricePoint, PriceSource};
    use chrono::{Duration, NaiveDate};

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c))
            .collect();
        PriceSeries::new(points, PriceSource::Yahoo).unwrap()
    }

    fn uptrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64 * 1.5).collect()
    }

    fn downtrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 200.0 - i as f64 * 1.5).collect()
    }

    #[test]
    fn test_rsi_min_periods() {
        assert_eq!(Rsi::default().min_periods(), 15);
        assert_eq!(Rsi::new(7).min_periods(), 8);
    }

    #[test]
    fn test_output_aligned_with_input() {
        let s = series(&uptrend(30));
        let values = compute_rsi(&s, 14);
        assert_eq!(values.len(), s.len());
        for (value, point) in values.iter().zip(s.points()) {
            assert_eq!(value.date, point.date);
        }
    }

    #[test]
    fn test_undefined_until_window_filled() {
        let values = compute_rsi(&series(&uptrend(20)), 14);
        assert!(values[..14].iter().all(|v| v.rsi.is_none()));
        assert!(values[14..].iter().all(|v| v.rsi.is_some()));
    }

    #[test]
    fn test_insufficient_data_is_all_undefined() {
        let values = compute_rsi(&series(&uptrend(14)), 14);
        assert!(values.iter().all(|v| v.rsi.is_none()));
        assert_eq!(current_rsi(&values), NEUTRAL_RSI);
    }

    #[test]
    fn test_uptrend_is_100() {
        let values = compute_rsi(&series(&uptrend(40)), 14);
        assert_eq!(current_rsi(&values), 100.0);
    }

    #[test]
    fn test_downtrend_is_0() {
        let values = compute_rsi(&series(&downtrend(40)), 14);
        assert!(current_rsi(&values) < 1e-9);
    }

    #[test]
    fn test_flat_series_has_no_losses() {
        let values = compute_rsi(&series(&[50.0; 20]), 14);
        assert_eq!(current_rsi(&values), 100.0);
    }

    #[test]
    fn test_known_value() {
        // alternating +2 / -1 over an even window: avg gain 1.0, avg loss 0.5
        let mut closes = vec![100.0];
        for i in 0..14 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let values = compute_rsi(&series(&closes), 14);
        let rsi = values.last().unwrap().rsi.unwrap();
        assert!((rsi - 100.0 * 2.0 / 3.0).abs() < 1e-9, "got {}", rsi);
    }

    #[test]
    fn test_rolling_window_forgets_old_moves() {
        // a crash followed by 14 gains: only the gains remain in the window
        let mut closes = vec![200.0, 100.0];
        closes.extend((1..=14).map(|i| 100.0 + i as f64));
        let values = compute_rsi(&series(&closes), 14);
        assert!(values[14].rsi.unwrap() < 100.0);
        assert_eq!(values[15].rsi, Some(100.0));
    }

    #[test]
    fn test_values_within_bounds() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + ((i * 7919) % 13) as f64 - 6.0)
            .collect();
        for value in compute_rsi(&series(&closes), 14) {
            if let Some(rsi) = value.rsi {
                assert!((0.0..=100.0).contains(&rsi), "out of range: {}", rsi);
            }
        }
    }

    #[test]
    fn test_zero_window_is_undefined() {
        let values = compute_rsi(&series(&uptrend(5)), 0);
        assert_eq!(values.len(), 5);
        assert!(values.iter().all(|v| v.rsi.is_none()));
    }
}
