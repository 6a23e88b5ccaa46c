//! Headline source: NewsAPI when a credential is available, otherwise a
//! static per-ticker table.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::fallback::{FallbackChain, TerminalProvider};
use crate::sources::{http_client, NewsApiClient};

/// Canned headlines per ticker.
pub const STATIC_HEADLINES: &[(&str, &[&str])] = &[
    (
        "MSFT",
        &[
            "Microsoft expands AI cloud partnerships",
            "Azure growth exceeds expectations",
        ],
    ),
    (
        "AAPL",
        &[
            "Apple announces AI-powered iPhone features",
            "Supply chain improvements boost production",
        ],
    ),
    (
        "NVDA",
        &[
            "Nvidia unveils next-gen AI chips",
            "Data center demand drives record revenue",
        ],
    ),
];

/// Used for tickers missing from [`STATIC_HEADLINES`].
pub const DEFAULT_HEADLINES: &[&str] = &[
    "Tech stocks rally on AI optimism",
    "Fed maintains interest rates",
];

/// Terminal provider backed by [`STATIC_HEADLINES`].
pub struct StaticHeadlineProvider;

impl TerminalProvider<Vec<String>> for StaticHeadlineProvider {
    fn name(&self) -> &str {
        "StaticHeadlines"
    }

    fn fetch(&self, ticker: &str) -> Vec<String> {
        let ticker = ticker.to_uppercase();
        STATIC_HEADLINES
            .iter()
            .find(|(symbol, _)| *symbol == ticker)
            .map(|(_, headlines)| *headlines)
            .unwrap_or(DEFAULT_HEADLINES)
            .iter()
            .map(|h| h.to_string())
            .collect()
    }
}

/// Headline lookup.
pub struct NewsService {
    client: Client,
    default_api_key: Option<String>,
    timeout: Duration,
    base_url: Option<String>,
}

impl NewsService {
    pub fn new(client: Client, default_api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client,
            default_api_key,
            timeout,
            base_url: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(
            http_client(config.news_timeout)?,
            config.news_api_key.clone(),
            config.news_timeout,
        ))
    }

    /// Point the live provider at a different endpoint.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    fn chain(&self, api_key: Option<&str>) -> FallbackChain<Vec<String>> {
        let chain: FallbackChain<Vec<String>> =
            FallbackChain::new(Arc::new(StaticHeadlineProvider), self.timeout);

        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.default_api_key.as_deref());

        match key {
            Some(key) => {
                let client = match self.base_url {
                    Some(ref url) => NewsApiClient::with_base_url(self.client.clone(), key.to_string(), url.clone()),
                    None => NewsApiClient::new(self.client.clone(), key.to_string()),
                };
                chain.with_provider(Arc::new(client))
            }
            None => chain,
        }
    }

    /// Up to five headlines for `ticker`.
    ///
    /// `api_key` overrides the configured NewsAPI key for this call.
    pub async fn fetch_headlines(&self, ticker: &str, api_key: Option<&str>) -> Vec<String> {
        self.chain(api_key).fetch(ticker).await.value
    }
}
