//! Trading signal derivation.
//!
//! RSI computation over daily closes and the rule table that turns RSI and
//! headline sentiment into a [`TradingSignal`](crate::types::TradingSignal).

pub mod classifier;
pub mod indicators;

pub use classifier::{classify, classify_technical};
pub use indicators::{compute_rsi, current_rsi, Rsi, NEUTRAL_RSI};
