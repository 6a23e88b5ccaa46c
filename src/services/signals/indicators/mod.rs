//! Technical indicator implementations.

pub mod rsi;

pub use rsi::{compute_rsi, current_rsi, Rsi, NEUTRAL_RSI};
