//! Alpha Vantage API client for daily stock prices.
//!
//! Primary price source. The free tier is heavily rate limited
//! (25 requests/day, 5/minute); a throttled call returns HTTP 200 with a
//! `Note` or `Information` message instead of data.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::error::ProviderError;
use crate::services::fallback::Provider;
use crate::types::{PricePoint, PriceSeries, PriceSource};

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";

/// Time series daily response.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesDailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    pub time_series: Option<HashMap<String, TimeSeriesDataPoint>>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
}

/// Individual time series data point. Only the close is used.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesDataPoint {
    #[serde(rename = "4. close")]
    pub close: String,
}

impl TimeSeriesDailyResponse {
    /// Convert into a normalized series.
    pub fn into_series(self) -> Result<PriceSeries, ProviderError> {
        let time_series = match self.time_series {
            Some(series) => series,
            None => {
                let reason = self.error_message.or(self.note).or(self.information);
                return Err(match reason {
                    Some(msg) => ProviderError::Rejected(msg),
                    None => ProviderError::MissingField("Time Series (Daily)"),
                });
            }
        };

        // Map order is arbitrary; PriceSeries sorts.
        let points = time_series
            .into_iter()
            .filter_map(|(date_str, point)| {
                let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").ok()?;
                let close = point.close.trim().parse().ok()?;
                Some(PricePoint::new(date, close))
            })
            .collect();

        PriceSeries::new(points, PriceSource::AlphaVantage)
    }
}

/// Alpha Vantage API client.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client.
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, ALPHA_VANTAGE_URL.to_string())
    }

    /// Create a client against a different endpoint.
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Get the compact (last 100 days) daily series.
    pub async fn get_daily_time_series(&self, symbol: &str) -> Result<PriceSeries, ProviderError> {
        debug!("Fetching Alpha Vantage daily series for {}", symbol);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", "compact"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        let data: TimeSeriesDailyResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        data.into_series()
    }
}

#[async_trait]
impl Provider<PriceSeries> for AlphaVantageClient {
    fn name(&self) -> &str {
        "AlphaVantage"
    }

    async fn fetch(&self, ticker: &str) -> Result<PriceSeries, ProviderError> {
        self.get_daily_time_series(ticker).await
    }
}
