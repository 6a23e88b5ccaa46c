//! End-to-end signal derivation for one ticker.
//!
//! prices -> RSI -> headlines -> sentiment -> classification -> report.
//! Each request runs sequentially; the pipeline itself is shared behind an
//! `Arc` and holds no per-request state.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{Config, DEFAULT_TICKER};
use crate::error::{AppError, Result};
use crate::services::market_data::MarketDataService;
use crate::services::news::NewsService;
use crate::services::sentiment::{build_scorer, score_headlines, SentimentScorer};
use crate::services::signals::{classify, classify_technical, compute_rsi, current_rsi};
use crate::types::{RsiZone, SentimentStrategy, SignalReport, SignalThresholds};

/// Longest accepted ticker symbol.
pub const MAX_TICKER_LEN: usize = 15;

/// Per-request inputs. Unset fields take the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct SignalRequest {
    pub ticker: Option<String>,
    pub sentiment_threshold: Option<f64>,
    pub oversold_rsi: Option<f64>,
    pub overbought_rsi: Option<f64>,
    /// NewsAPI key for this request only.
    pub news_api_key: Option<String>,
}

impl SignalRequest {
    pub fn for_ticker(ticker: impl Into<String>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Self::default()
        }
    }
}

/// Trim and upper-case a ticker, defaulting to MSFT when blank.
///
/// Accepts 1-15 characters of `A-Z 0-9 . - ^ =` (covers `BRK.B`, `^GSPC`,
/// `EURUSD=X`).
pub fn normalize_ticker(raw: Option<&str>) -> Result<String> {
    let ticker = raw.map(str::trim).unwrap_or("").to_ascii_uppercase();
    if ticker.is_empty() {
        return Ok(DEFAULT_TICKER.to_string());
    }
    if ticker.len() > MAX_TICKER_LEN {
        return Err(AppError::BadRequest(format!(
            "ticker must be at most {} characters",
            MAX_TICKER_LEN
        )));
    }
    let valid = ticker
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '^' | '='));
    if !valid {
        return Err(AppError::BadRequest(format!("invalid ticker: {}", ticker)));
    }
    Ok(ticker)
}

/// The signal pipeline.
pub struct SignalPipeline {
    market_data: MarketDataService,
    news: NewsService,
    scorer: Option<Arc<dyn SentimentScorer>>,
    rsi_window: usize,
    thresholds: SignalThresholds,
}

impl SignalPipeline {
    pub fn new(
        market_data: MarketDataService,
        news: NewsService,
        scorer: Option<Arc<dyn SentimentScorer>>,
        rsi_window: usize,
        thresholds: SignalThresholds,
    ) -> Self {
        Self {
            market_data,
            news,
            scorer,
            rsi_window,
            thresholds,
        }
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, reqwest::Error> {
        Ok(Self::new(
            MarketDataService::from_config(config)?,
            NewsService::from_config(config)?,
            build_scorer(config),
            config.rsi_window,
            config.thresholds,
        ))
    }

    pub fn market_data(&self) -> &MarketDataService {
        &self.market_data
    }

    pub fn sentiment_strategy(&self) -> SentimentStrategy {
        self.scorer
            .as_ref()
            .map(|s| s.strategy())
            .unwrap_or(SentimentStrategy::None)
    }

    /// Request thresholds merged over the defaults, then validated.
    pub fn resolve_thresholds(&self, request: &SignalRequest) -> Result<SignalThresholds> {
        let thresholds = SignalThresholds {
            sentiment_threshold: request
                .sentiment_threshold
                .unwrap_or(self.thresholds.sentiment_threshold),
            oversold_rsi: request.oversold_rsi.unwrap_or(self.thresholds.oversold_rsi),
            overbought_rsi: request.overbought_rsi.unwrap_or(self.thresholds.overbought_rsi),
        };
        thresholds.validate().map_err(AppError::BadRequest)?;
        Ok(thresholds)
    }

    /// Run the pipeline. Returns the report and whether prices came from the cache.
    ///
    /// Only malformed input fails; upstream outages degrade to fallback data.
    pub async fn analyze(&self, request: &SignalRequest) -> Result<(SignalReport, bool)> {
        let ticker = normalize_ticker(request.ticker.as_deref())?;
        let thresholds = self.resolve_thresholds(request)?;

        let lookup = self.market_data.fetch_prices(&ticker).await;
        let series = lookup.series;

        let rsi_values = compute_rsi(&series, self.rsi_window);
        let rsi = current_rsi(&rsi_values);

        let (signal, sentiment_results) = match self.scorer {
            Some(ref scorer) => {
                let headlines = self
                    .news
                    .fetch_headlines(&ticker, request.news_api_key.as_deref())
                    .await;
                let results = score_headlines(scorer.as_ref(), &headlines).await;
                debug!(
                    "[Pipeline] {}: scored {}/{} headlines",
                    ticker,
                    results.len(),
                    headlines.len()
                );
                (classify(rsi, &results, &thresholds), results)
            }
            None => (classify_technical(rsi, &thresholds), Vec::new()),
        };

        info!(
            "[Pipeline] {} -> {} ({}), RSI {:.1}, prices from {}",
            ticker,
            signal.label,
            signal.reason,
            rsi,
            series.source()
        );

        let report = SignalReport {
            ticker,
            signal: signal.label,
            color: signal.color,
            reason: signal.reason,
            current_price: series.current_price(),
            previous_price: series.previous_price(),
            change_percent: series.change_percent(),
            current_rsi: rsi,
            rsi_zone: RsiZone::classify(rsi, &thresholds),
            dates: series.date_labels(),
            prices: series.closes(),
            rsi_values: rsi_values.iter().map(|v| v.rsi).collect(),
            sentiment_results,
            price_source: series.source(),
            sentiment_strategy: self.sentiment_strategy(),
            thresholds,
            generated_at: Utc::now().timestamp_millis(),
        };

        Ok((report, lookup.cached))
    }
}
