//! NewsAPI client for ticker headlines.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::services::fallback::Provider;

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Headlines kept per request.
pub const MAX_HEADLINES: usize = 5;

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: Option<String>,
    message: Option<String>,
    articles: Option<Vec<NewsArticle>>,
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    title: Option<String>,
}

/// Extract up to [`MAX_HEADLINES`] titles from a response body.
///
/// A non-"ok" status or a missing `articles` array is a failure; an "ok"
/// response with no articles is a valid empty result.
fn parse_headlines(body: &str) -> Result<Vec<String>, ProviderError> {
    let data: NewsApiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if let Some(status) = data.status.as_deref() {
        if status != "ok" {
            return Err(ProviderError::Rejected(
                data.message.unwrap_or_else(|| status.to_string()),
            ));
        }
    }

    let articles = data.articles.ok_or(ProviderError::MissingField("articles"))?;

    Ok(articles
        .into_iter()
        .filter_map(|a| a.title)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .take(MAX_HEADLINES)
        .collect())
}

/// NewsAPI client bound to one credential.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, NEWS_API_URL.to_string())
    }

    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Search English articles mentioning the ticker.
    pub async fn get_headlines(&self, ticker: &str) -> Result<Vec<String>, ProviderError> {
        debug!("Fetching NewsAPI headlines for {}", ticker);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", ticker),
                ("language", "en"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        // Error bodies carry a useful message, so parse them too.
        let status = response.status();
        let body = response.text().await?;
        match parse_headlines(&body) {
            Ok(headlines) if status.is_success() => Ok(headlines),
            Ok(_) => Err(ProviderError::Status(status)),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Provider<Vec<String>> for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch(&self, ticker: &str) -> Result<Vec<String>, ProviderError> {
        self.get_headlines(ticker).await
    }
}
