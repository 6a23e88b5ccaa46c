//! Rule-based signal classification.

use crate::types::{SentimentResult, SignalLabel, SignalThresholds, TradingSignal};

/// Classify from the current RSI and scored headlines.
///
/// Headlines count only when their confidence is strictly above
/// `thresholds.sentiment_threshold`. Bullish news is checked before bearish
/// news, so when both are present the result is BUY or STRONG_BUY.
pub fn classify(
    current_rsi: f64,
    sentiments: &[SentimentResult],
    thresholds: &SignalThresholds,
) -> TradingSignal {
    let threshold = thresholds.sentiment_threshold;
    let bullish = sentiments.iter().filter(|s| s.is_bullish(threshold)).count();
    let bearish = sentiments.iter().filter(|s| s.is_bearish(threshold)).count();

    if bullish > 0 {
        if current_rsi < thresholds.oversold_rsi {
            return TradingSignal::new(
                SignalLabel::StrongBuy,
                format!("{} bullish news + Oversold (RSI: {:.1})", bullish, current_rsi),
            );
        }
        return TradingSignal::new(SignalLabel::Buy, format!("{} bullish news", bullish));
    }

    if bearish > 0 {
        if current_rsi > thresholds.overbought_rsi {
            return TradingSignal::new(
                SignalLabel::Sell,
                format!("{} bearish news + Overbought (RSI: {:.1})", bearish, current_rsi),
            );
        }
        return TradingSignal::new(SignalLabel::Caution, format!("{} bearish news", bearish));
    }

    TradingSignal::new(SignalLabel::Hold, "Market neutral")
}

/// Classify from RSI alone, for deployments without a news source.
pub fn classify_technical(current_rsi: f64, thresholds: &SignalThresholds) -> TradingSignal {
    if current_rsi < thresholds.oversold_rsi {
        TradingSignal::new(SignalLabel::Buy, format!("Oversold (RSI: {:.1})", current_rsi))
    } else if current_rsi > thresholds.overbought_rsi {
        TradingSignal::new(SignalLabel::Sell, format!("Overbought (RSI: {:.1})", current_rsi))
    } else {
        TradingSignal::new(SignalLabel::Hold, "Market neutral")
    }
}
