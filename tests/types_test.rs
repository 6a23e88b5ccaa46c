//! Wire-format tests for public types

use chrono::NaiveDate;
use tickersignal::types::{
    PricePoint, PriceSeries, PriceSource, RsiZone, SentimentLabel, SentimentResult,
    SentimentStrategy, SignalLabel, SignalReport, SignalThresholds,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_price_series_is_sorted_and_deduplicated() {
    let series = PriceSeries::new(
        vec![
            PricePoint::new(date(2024, 3, 3), 12.0),
            PricePoint::new(date(2024, 3, 1), 10.0),
            PricePoint::new(date(2024, 3, 2), 11.0),
            PricePoint::new(date(2024, 3, 2), 11.5),
        ],
        PriceSource::AlphaVantage,
    )
    .unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.closes(), vec![10.0, 11.5, 12.0]);
    assert_eq!(
        series.date_labels(),
        vec!["2024-03-01", "2024-03-02", "2024-03-03"]
    );
}

#[test]
fn test_empty_series_is_an_error() {
    assert!(PriceSeries::new(Vec::new(), PriceSource::Fmp).is_err());
}

#[test]
fn test_fallback_series_shape() {
    let today = date(2024, 6, 30);
    let series = PriceSeries::fallback(today);
    assert_eq!(series.len(), 8);
    assert_eq!(series.source(), PriceSource::Fallback);
    assert_eq!(series.points()[0].date, date(2024, 6, 23));
    assert_eq!(series.current_price(), 421.30);
    assert_eq!(series.previous_price(), 420.10);
    assert!(series.points().windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn test_sentiment_result_json() {
    let result = SentimentResult::new("Upgrade", SentimentLabel::Positive, 0.8);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"headline": "Upgrade", "sentiment": "POSITIVE", "confidence": 0.8})
    );
}

#[test]
fn test_signal_report_json_is_camel_case() {
    let report = SignalReport {
        ticker: "MSFT".to_string(),
        signal: SignalLabel::StrongBuy,
        color: "green".to_string(),
        reason: "1 bullish news + Oversold (RSI: 25.0)".to_string(),
        current_price: 101.0,
        previous_price: 100.0,
        change_percent: 1.0,
        current_rsi: 25.0,
        rsi_zone: RsiZone::Oversold,
        dates: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
        prices: vec![100.0, 101.0],
        rsi_values: vec![None, Some(25.0)],
        sentiment_results: Vec::new(),
        price_source: PriceSource::Yahoo,
        sentiment_strategy: SentimentStrategy::Heuristic,
        thresholds: SignalThresholds::default(),
        generated_at: 0,
    };

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["signal"], "STRONG_BUY");
    assert_eq!(json["currentPrice"], 101.0);
    assert_eq!(json["previousPrice"], 100.0);
    assert_eq!(json["currentRsi"], 25.0);
    assert_eq!(json["rsiZone"], "oversold");
    assert!(json["rsiValues"][0].is_null());
    assert_eq!(json["rsiValues"][1], 25.0);
    assert_eq!(json["sentimentStrategy"], "heuristic");
    assert_eq!(json["thresholds"]["sentimentThreshold"], 0.85);
    assert_eq!(json["thresholds"]["oversoldRsi"], 30.0);
}
