use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::SentimentResult;

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalLabel {
    StrongBuy,
    Buy,
    Hold,
    Caution,
    Sell,
}

impl SignalLabel {
    /// Display color hint for presentation layers.
    pub fn color(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "green",
            SignalLabel::Buy => "blue",
            SignalLabel::Hold => "gray",
            SignalLabel::Caution => "orange",
            SignalLabel::Sell => "red",
        }
    }

    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "STRONG BUY",
            SignalLabel::Buy => "BUY",
            SignalLabel::Hold => "HOLD",
            SignalLabel::Caution => "CAUTION",
            SignalLabel::Sell => "SELL",
        }
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classified signal with its color and the reason it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSignal {
    pub label: SignalLabel,
    pub color: String,
    pub reason: String,
}

impl TradingSignal {
    pub fn new(label: SignalLabel, reason: impl Into<String>) -> Self {
        Self {
            label,
            color: label.color().to_string(),
            reason: reason.into(),
        }
    }
}

/// Tunable cutoffs for classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalThresholds {
    /// A headline counts only when its confidence is strictly above this.
    pub sentiment_threshold: f64,
    pub oversold_rsi: f64,
    pub overbought_rsi: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            sentiment_threshold: 0.85,
            oversold_rsi: 30.0,
            overbought_rsi: 70.0,
        }
    }
}

impl SignalThresholds {
    /// Check ranges: threshold in [0, 1], RSI bounds in [0, 100], oversold below overbought.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.sentiment_threshold) {
            return Err(format!(
                "sentiment threshold must be within [0, 1], got {}",
                self.sentiment_threshold
            ));
        }
        for (name, value) in [
            ("oversold RSI", self.oversold_rsi),
            ("overbought RSI", self.overbought_rsi),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("{} must be within [0, 100], got {}", name, value));
            }
        }
        if self.oversold_rsi >= self.overbought_rsi {
            return Err(format!(
                "oversold RSI ({}) must be below overbought RSI ({})",
                self.oversold_rsi, self.overbought_rsi
            ));
        }
        Ok(())
    }
}

/// RSI at one date; `None` until the lookback window is filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub date: NaiveDate,
    pub rsi: Option<f64>,
}

/// Where the current RSI sits relative to the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    pub fn classify(rsi: f64, thresholds: &SignalThresholds) -> Self {
        if rsi < thresholds.oversold_rsi {
            RsiZone::Oversold
        } else if rsi > thresholds.overbought_rsi {
            RsiZone::Overbought
        } else {
            RsiZone::Neutral
        }
    }
}

/// Full output of one pipeline run, ready for presentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    pub ticker: String,
    pub signal: SignalLabel,
    pub color: String,
    pub reason: String,
    pub current_price: f64,
    pub previous_price: f64,
    pub change_percent: f64,
    pub current_rsi: f64,
    pub rsi_zone: RsiZone,
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    pub rsi_values: Vec<Option<f64>>,
    pub sentiment_results: Vec<SentimentResult>,
    pub price_source: super::PriceSource,
    pub sentiment_strategy: super::SentimentStrategy,
    pub thresholds: SignalThresholds,
    pub generated_at: i64,
}
