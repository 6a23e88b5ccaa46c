use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProviderError;

/// Price source identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    AlphaVantage,
    Fmp,
    Yahoo,
    /// Bundled placeholder series used when every upstream failed.
    Fallback,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::AlphaVantage => write!(f, "alphavantage"),
            PriceSource::Fmp => write!(f, "fmp"),
            PriceSource::Yahoo => write!(f, "yahoo"),
            PriceSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closes for one ticker.
///
/// Always non-empty and strictly ascending by date. The only way to build one
/// is [`PriceSeries::new`], which normalizes whatever order the upstream used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    source: PriceSource,
}

/// Closes of the bundled placeholder series, oldest first.
pub const FALLBACK_CLOSES: [f64; 8] = [
    420.69, 419.32, 418.75, 417.80, 418.25, 419.50, 420.10, 421.30,
];

impl PriceSeries {
    /// Normalize raw points into a series.
    ///
    /// Sorts ascending, drops non-positive or non-finite closes and collapses
    /// duplicate dates (the later entry wins). Fails with
    /// [`ProviderError::Empty`] if nothing usable is left.
    pub fn new(mut points: Vec<PricePoint>, source: PriceSource) -> Result<Self, ProviderError> {
        points.retain(|p| p.close.is_finite() && p.close > 0.0);
        // Stable sort keeps upstream order among equal dates, so "last wins" holds.
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        if deduped.is_empty() {
            return Err(ProviderError::Empty);
        }

        Ok(Self {
            points: deduped,
            source,
        })
    }

    /// Placeholder series ending on `today`, one point per calendar day.
    pub fn fallback(today: NaiveDate) -> Self {
        let count = FALLBACK_CLOSES.len() as i64;
        let points = FALLBACK_CLOSES
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(today - Duration::days(count - 1 - i as i64), close))
            .collect();

        Self {
            points,
            source: PriceSource::Fallback,
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn source(&self) -> PriceSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Dates formatted as `YYYY-MM-DD`.
    pub fn date_labels(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// Most recent close.
    pub fn current_price(&self) -> f64 {
        // Non-empty by construction.
        self.points.last().map(|p| p.close).unwrap_or_default()
    }

    /// Close before the most recent one, or the current close for a
    /// single-point series.
    pub fn previous_price(&self) -> f64 {
        let n = self.points.len();
        if n > 1 {
            self.points[n - 2].close
        } else {
            self.current_price()
        }
    }

    /// Percentage change between the previous and current close.
    pub fn change_percent(&self) -> f64 {
        let prev = self.previous_price();
        if prev == 0.0 {
            return 0.0;
        }
        (self.current_price() - prev) / prev * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_price_source_display() {
        assert_eq!(PriceSource::AlphaVantage.to_string(), "alphavantage");
        assert_eq!(PriceSource::Fmp.to_string(), "fmp");
        assert_eq!(PriceSource::Yahoo.to_string(), "yahoo");
        assert_eq!(PriceSource::Fallback.to_string(), "fallback");
    }

    #[test]
    fn test_series_sorts_newest_first_input() {
        let series = PriceSeries::new(
            vec![
                PricePoint::new(date(2024, 1, 3), 103.0),
                PricePoint::new(date(2024, 1, 2), 102.0),
                PricePoint::new(date(2024, 1, 1), 101.0),
            ],
            PriceSource::Fmp,
        )
        .unwrap();

        assert_eq!(series.closes(), vec![101.0, 102.0, 103.0]);
        assert_eq!(series.date_labels()[0], "2024-01-01");
        assert_eq!(series.source(), PriceSource::Fmp);
    }

    #[test]
    fn test_series_drops_invalid_and_duplicate_points() {
        let series = PriceSeries::new(
            vec![
                PricePoint::new(date(2024, 1, 1), 101.0),
                PricePoint::new(date(2024, 1, 2), 0.0),
                PricePoint::new(date(2024, 1, 3), f64::NAN),
                PricePoint::new(date(2024, 1, 1), 105.0),
            ],
            PriceSource::Yahoo,
        )
        .unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.current_price(), 105.0);
    }

    #[test]
    fn test_series_rejects_empty() {
        assert!(matches!(
            PriceSeries::new(vec![], PriceSource::AlphaVantage),
            Err(ProviderError::Empty)
        ));
        assert!(PriceSeries::new(
            vec![PricePoint::new(date(2024, 1, 1), -3.0)],
            PriceSource::AlphaVantage
        )
        .is_err());
    }

    #[test]
    fn test_fallback_series_shape() {
        let today = date(2024, 3, 10);
        let series = PriceSeries::fallback(today);

        assert_eq!(series.len(), 8);
        assert_eq!(series.source(), PriceSource::Fallback);
        assert_eq!(series.points().first().unwrap().date, date(2024, 3, 3));
        assert_eq!(series.points().last().unwrap().date, today);
        assert_eq!(series.closes(), FALLBACK_CLOSES.to_vec());
        assert!(series.points().windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_current_and_previous_price() {
        let series = PriceSeries::fallback(date(2024, 3, 10));
        assert_eq!(series.current_price(), 421.30);
        assert_eq!(series.previous_price(), 420.10);
        assert!(series.change_percent() > 0.0);
    }

    #[test]
    fn test_single_point_previous_equals_current() {
        let series = PriceSeries::new(
            vec![PricePoint::new(date(2024, 1, 1), 50.0)],
            PriceSource::Yahoo,
        )
        .unwrap();
        assert_eq!(series.previous_price(), 50.0);
        assert_eq!(series.change_percent(), 0.0);
    }
}
