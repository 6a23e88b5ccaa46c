use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::types::{SentimentStrategy, SignalThresholds};

/// Default Hugging Face text-classification model for headline sentiment.
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Default inference endpoint; the model id is appended.
pub const DEFAULT_SENTIMENT_MODEL_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Ticker used when a request does not name one.
pub const DEFAULT_TICKER: &str = "MSFT";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Alpha Vantage API key (primary price source).
    pub alpha_vantage_api_key: Option<String>,
    /// Financial Modeling Prep API key (secondary price source).
    pub fmp_api_key: Option<String>,
    /// Query Yahoo Finance when the keyed providers fail.
    pub yahoo_enabled: bool,
    /// NewsAPI key used when a request does not carry its own.
    pub news_api_key: Option<String>,
    /// Hugging Face token for the model-based scorer.
    pub hf_api_token: Option<String>,
    /// Which sentiment scorer to use.
    pub sentiment_strategy: SentimentStrategy,
    /// Model id for the model-based scorer.
    pub sentiment_model: String,
    /// Inference endpoint base URL.
    pub sentiment_model_url: String,
    /// Per-attempt timeout for price providers.
    pub provider_timeout: Duration,
    /// Timeout for the news provider.
    pub news_timeout: Duration,
    /// Timeout for one classifier call.
    pub model_timeout: Duration,
    /// TTL for cached live price series (zero disables caching).
    pub price_cache_ttl: Duration,
    /// RSI lookback window.
    pub rsi_window: usize,
    /// Default classification thresholds.
    pub thresholds: SignalThresholds,
}

/// Parse a boolean switch, ignoring case. Unrecognised values give `None`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            alpha_vantage_api_key: None,
            fmp_api_key: None,
            yahoo_enabled: true,
            news_api_key: None,
            hf_api_token: None,
            sentiment_strategy: SentimentStrategy::Heuristic,
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            sentiment_model_url: DEFAULT_SENTIMENT_MODEL_URL.to_string(),
            provider_timeout: Duration::from_secs(5),
            news_timeout: Duration::from_secs(10),
            model_timeout: Duration::from_secs(10),
            price_cache_ttl: Duration::from_secs(300),
            rsi_window: 14,
            thresholds: SignalThresholds::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing or unparseable values fall back to the defaults. Empty strings
    /// count as missing so `FMP_API_KEY=` in a `.env` file disables the provider.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let parse = |key: &str| get(key).and_then(|v| v.parse::<f64>().ok());
        let secs = |key: &str, default: Duration| {
            get(key)
                .and_then(|v| u64::from_str(&v).ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        let thresholds = SignalThresholds {
            sentiment_threshold: parse("SENTIMENT_THRESHOLD")
                .unwrap_or(defaults.thresholds.sentiment_threshold),
            oversold_rsi: parse("OVERSOLD_RSI").unwrap_or(defaults.thresholds.oversold_rsi),
            overbought_rsi: parse("OVERBOUGHT_RSI").unwrap_or(defaults.thresholds.overbought_rsi),
        };
        // Never start with thresholds that would reject every request.
        let thresholds = if thresholds.validate().is_ok() {
            thresholds
        } else {
            defaults.thresholds
        };

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            alpha_vantage_api_key: get("ALPHA_VANTAGE_API_KEY"),
            fmp_api_key: get("FMP_API_KEY"),
            yahoo_enabled: get("YAHOO_ENABLED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.yahoo_enabled),
            news_api_key: get("NEWS_API_KEY"),
            hf_api_token: get("HF_API_TOKEN"),
            sentiment_strategy: get("SENTIMENT_STRATEGY")
                .and_then(|s| SentimentStrategy::from_str(&s))
                .unwrap_or(defaults.sentiment_strategy),
            sentiment_model: get("SENTIMENT_MODEL").unwrap_or(defaults.sentiment_model),
            sentiment_model_url: get("SENTIMENT_MODEL_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.sentiment_model_url),
            provider_timeout: secs("PROVIDER_TIMEOUT_SECS", defaults.provider_timeout),
            news_timeout: secs("NEWS_TIMEOUT_SECS", defaults.news_timeout),
            model_timeout: secs("MODEL_TIMEOUT_SECS", defaults.model_timeout),
            price_cache_ttl: secs("PRICE_CACHE_TTL_SECS", defaults.price_cache_ttl),
            rsi_window: get("RSI_WINDOW")
                .and_then(|v| v.parse().ok())
                .filter(|w: &usize| *w > 0)
                .unwrap_or(defaults.rsi_window),
            thresholds,
        }
    }

    /// Full classifier endpoint for the configured model.
    pub fn sentiment_endpoint(&self) -> String {
        format!("{}/{}", self.sentiment_model_url, self.sentiment_model)
    }
}
