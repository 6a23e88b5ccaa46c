use serde::{Deserialize, Serialize};
use std::fmt;

/// Polarity assigned to a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Parse a classifier label ("POSITIVE", "negative", ...).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" | "POS" => Some(Self::Positive),
            "NEGATIVE" | "NEG" => Some(Self::Negative),
            "NEUTRAL" | "NEU" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment of one headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub headline: String,
    #[serde(rename = "sentiment")]
    pub label: SentimentLabel,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

impl SentimentResult {
    pub fn new(headline: impl Into<String>, label: SentimentLabel, confidence: f64) -> Self {
        Self {
            headline: headline.into(),
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// POSITIVE with confidence strictly above `threshold`.
    pub fn is_bullish(&self, threshold: f64) -> bool {
        self.label == SentimentLabel::Positive && self.confidence > threshold
    }

    /// NEGATIVE with confidence strictly above `threshold`.
    pub fn is_bearish(&self, threshold: f64) -> bool {
        self.label == SentimentLabel::Negative && self.confidence > threshold
    }
}

/// Which scorer a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SentimentStrategy {
    /// Keyword counting.
    #[default]
    Heuristic,
    /// Pretrained text classifier behind an inference API.
    Model,
    /// No news at all; the signal comes from RSI alone.
    None,
}

impl SentimentStrategy {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "keyword" | "keywords" => Some(Self::Heuristic),
            "model" | "classifier" | "transformer" => Some(Self::Model),
            "none" | "off" | "disabled" | "technical" => Some(Self::None),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Model => "model",
            Self::None => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!(SentimentLabel::from_str("POSITIVE"), Some(SentimentLabel::Positive));
        assert_eq!(SentimentLabel::from_str("negative"), Some(SentimentLabel::Negative));
        assert_eq!(SentimentLabel::from_str(" Neutral "), Some(SentimentLabel::Neutral));
        assert_eq!(SentimentLabel::from_str("LABEL_1"), None);
    }

    #[test]
    fn test_label_serialization() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
    }

    #[test]
    fn test_result_wire_format() {
        let result = SentimentResult::new("Azure growth", SentimentLabel::Positive, 0.8);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["headline"], "Azure growth");
        assert_eq!(json["sentiment"], "POSITIVE");
        assert_eq!(json["confidence"], 0.8);
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(SentimentResult::new("x", SentimentLabel::Positive, 1.2).confidence, 1.0);
        assert_eq!(SentimentResult::new("x", SentimentLabel::Negative, -0.1).confidence, 0.0);
    }

    #[test]
    fn test_bullish_bearish_are_strict() {
        let pos = SentimentResult::new("x", SentimentLabel::Positive, 0.85);
        assert!(!pos.is_bullish(0.85));
        assert!(pos.is_bullish(0.8));
        assert!(!pos.is_bearish(0.0));

        let neg = SentimentResult::new("x", SentimentLabel::Negative, 0.9);
        assert!(neg.is_bearish(0.85));
        assert!(!neg.is_bullish(0.0));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(SentimentStrategy::from_str("heuristic"), Some(SentimentStrategy::Heuristic));
        assert_eq!(SentimentStrategy::from_str("MODEL"), Some(SentimentStrategy::Model));
        assert_eq!(SentimentStrategy::from_str("none"), Some(SentimentStrategy::None));
        assert_eq!(SentimentStrategy::from_str("bogus"), None);
        assert_eq!(SentimentStrategy::default(), SentimentStrategy::Heuristic);
    }
}
