//! Headline sentiment scoring.
//!
//! Two interchangeable [`SentimentScorer`]s: keyword counting and a
//! pretrained classifier behind the Hugging Face Inference API. The
//! deployment picks one through [`build_scorer`].

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::SentimentError;
use crate::sources::{http_client, HuggingFaceClient};
use crate::types::{SentimentLabel, SentimentResult, SentimentStrategy};

pub const POSITIVE_KEYWORDS: &[&str] = &["buy", "strong", "growth", "beat", "upgrade", "bullish"];
pub const NEGATIVE_KEYWORDS: &[&str] = &["sell", "cut", "downgrade", "bearish", "warning", "drop"];

/// Scores one headline.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Strategy implemented by this scorer.
    fn strategy(&self) -> SentimentStrategy;

    async fn score(&self, headline: &str) -> Result<SentimentResult, SentimentError>;
}

/// Keyword-counting scorer. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    /// Positive minus negative keyword hits (case-insensitive substring match).
    pub fn keyword_score(headline: &str) -> i32 {
        let text = headline.to_lowercase();
        let hits = |words: &[&str]| words.iter().filter(|w| text.contains(*w)).count() as i32;
        hits(POSITIVE_KEYWORDS) - hits(NEGATIVE_KEYWORDS)
    }

    pub fn score_text(headline: &str) -> SentimentResult {
        let score = Self::keyword_score(headline);
        let confidence = || 0.7 + (score.abs() as f64 * 0.1).min(0.3);

        match score {
            s if s > 0 => SentimentResult::new(headline, SentimentLabel::Positive, confidence()),
            s if s < 0 => SentimentResult::new(headline, SentimentLabel::Negative, confidence()),
            _ => SentimentResult::new(headline, SentimentLabel::Neutral, 0.5),
        }
    }
}

#[async_trait]
impl SentimentScorer for HeuristicScorer {
    fn strategy(&self) -> SentimentStrategy {
        SentimentStrategy::Heuristic
    }

    async fn score(&self, headline: &str) -> Result<SentimentResult, SentimentError> {
        Ok(Self::score_text(headline))
    }
}

/// Classifier-backed scorer.
///
/// The HTTP handle to the model is built on first use and then shared,
/// read-only, by every request holding this scorer.
pub struct ModelScorer {
    endpoint: String,
    api_token: Option<String>,
    timeout: Duration,
    handle: OnceCell<HuggingFaceClient>,
}

impl ModelScorer {
    pub fn new(endpoint: String, api_token: Option<String>, timeout: Duration) -> Self {
        Self {
            endpoint,
            api_token,
            timeout,
            handle: OnceCell::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.sentiment_endpoint(),
            config.hf_api_token.clone(),
            config.model_timeout,
        )
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }

    async fn model(&self) -> Result<&HuggingFaceClient, SentimentError> {
        self.handle
            .get_or_try_init(|| async {
                let client = http_client(self.timeout)
                    .map_err(|e| SentimentError::Unavailable(e.to_string()))?;
                info!("Sentiment model handle ready: {}", self.endpoint);
                Ok::<_, SentimentError>(HuggingFaceClient::new(
                    client,
                    self.endpoint.clone(),
                    self.api_token.clone(),
                ))
            })
            .await
    }
}

#[async_trait]
impl SentimentScorer for ModelScorer {
    fn strategy(&self) -> SentimentStrategy {
        SentimentStrategy::Model
    }

    async fn score(&self, headline: &str) -> Result<SentimentResult, SentimentError> {
        let model = self.model().await?;
        let (label, confidence) = model.classify(headline).await?;
        Ok(SentimentResult::new(headline, label, confidence))
    }
}

/// Build the scorer selected by configuration.
///
/// Returns `None` for [`SentimentStrategy::None`].
pub fn build_scorer(config: &Config) -> Option<Arc<dyn SentimentScorer>> {
    match config.sentiment_strategy {
        SentimentStrategy::Heuristic => Some(Arc::new(HeuristicScorer)),
        SentimentStrategy::Model => Some(Arc::new(ModelScorer::from_config(config))),
        SentimentStrategy::None => None,
    }
}

/// Score headlines in order, skipping any that fail.
pub async fn score_headlines(scorer: &dyn SentimentScorer, headlines: &[String]) -> Vec<SentimentResult> {
    let mut results = Vec::with_capacity(headlines.len());
    for headline in headlines {
        match scorer.score(headline).await {
            Ok(result) => results.push(result),
            Err(e) => warn!("Skipping headline {:?}: {}", headline, e),
        }
    }
    results
}
