//! Financial Modeling Prep client for daily stock prices.
//!
//! Secondary price source. `historical-price-full` returns newest-first.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::services::fallback::Provider;
use crate::types::{PricePoint, PriceSeries, PriceSource};

const FMP_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Historical price response.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalPriceResponse {
    pub symbol: Option<String>,
    pub historical: Option<Vec<HistoricalPrice>>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
}

/// One day of history.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalPrice {
    pub date: String,
    pub close: f64,
}

impl HistoricalPriceResponse {
    /// Convert into a normalized (ascending) series.
    pub fn into_series(self) -> Result<PriceSeries, ProviderError> {
        if let Some(msg) = self.error_message {
            return Err(ProviderError::Rejected(msg));
        }

        let historical = self
            .historical
            .ok_or(ProviderError::MissingField("historical"))?;

        let points = historical
            .into_iter()
            .filter_map(|day| {
                // Some plans return "2024-01-05 00:00:00"
                let date_part = day.date.get(..10).unwrap_or(&day.date);
                let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
                Some(PricePoint::new(date, day.close))
            })
            .collect();

        PriceSeries::new(points, PriceSource::Fmp)
    }
}

/// Financial Modeling Prep API client.
pub struct FmpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FmpClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, FMP_URL.to_string())
    }

    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch full daily history for a symbol.
    pub async fn get_historical_prices(&self, symbol: &str) -> Result<PriceSeries, ProviderError> {
        let url = format!("{}/historical-price-full/{}", self.base_url, symbol);
        debug!("Fetching FMP history: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        let body = response.text().await?;
        parse_historical(&body)
    }
}

/// Parse a raw response body.
///
/// FMP answers unknown symbols with `{}` or `[]` rather than an error status.
pub fn parse_historical(body: &str) -> Result<PriceSeries, ProviderError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if !value.is_object() {
        return Err(ProviderError::MissingField("historical"));
    }

    let data: HistoricalPriceResponse =
        serde_json::from_value(value).map_err(|e| ProviderError::Parse(e.to_string()))?;
    data.into_series()
}

#[async_trait]
impl Provider<PriceSeries> for FmpClient {
    fn name(&self) -> &str {
        "FMP"
    }

    async fn fetch(&self, ticker: &str) -> Result<PriceSeries, ProviderError> {
        self.get_historical_prices(ticker).await
    }
}
