//! Hugging Face Inference API client for text classification.
//!
//! Backs the model-based sentiment scorer. The default model
//! (distilbert SST-2) is binary: POSITIVE or NEGATIVE.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::SentimentError;
use crate::types::SentimentLabel;

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The API nests results per input, except for some pipelines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Error { error: String },
}

/// Pick the highest-scoring label from a response body.
fn parse_classification(body: &str) -> Result<(SentimentLabel, f64), SentimentError> {
    let response: ClassificationResponse =
        serde_json::from_str(body).map_err(|e| SentimentError::Parse(e.to_string()))?;

    let candidates = match response {
        ClassificationResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
        ClassificationResponse::Flat(flat) => flat,
        ClassificationResponse::Error { error } => return Err(SentimentError::Unavailable(error)),
    };

    let best = candidates
        .into_iter()
        .filter(|c| c.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| SentimentError::Parse("empty classification".to_string()))?;

    let label = SentimentLabel::from_str(&best.label)
        .ok_or_else(|| SentimentError::Parse(format!("unknown label {}", best.label)))?;

    Ok((label, best.score.clamp(0.0, 1.0)))
}

/// Inference API client for one model endpoint.
pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(client: Client, endpoint: String, api_token: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_token,
        }
    }

    /// Classify one text, returning the top label and its score.
    pub async fn classify(&self, text: &str) -> Result<(SentimentLabel, f64), SentimentError> {
        debug!("Classifying headline via {}", self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "inputs": text }));

        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return parse_classification(&body);
        }

        // A loading model answers 503 with an `error` message worth keeping.
        match parse_classification(&body) {
            Err(SentimentError::Unavailable(msg)) => Err(SentimentError::Unavailable(msg)),
            _ => Err(SentimentError::Status(status)),
        }
    }
}
