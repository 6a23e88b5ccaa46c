//! Yahoo Finance chart API client for daily stock prices.
//!
//! Tertiary price source. Keyless, uses the unofficial chart endpoint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::services::fallback::Provider;
use crate::types::{PricePoint, PriceSeries, PriceSource};

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// One month of daily bars covers a 14-period RSI.
const YAHOO_RANGE: &str = "1mo";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Parse a chart response body into a series.
fn parse_chart(body: &str) -> Result<PriceSeries, ProviderError> {
    let data: YahooChartResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if let Some(error) = data.chart.error {
        return Err(ProviderError::Rejected(format!(
            "{} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or(ProviderError::MissingField("chart.result"))?;

    let timestamps = result
        .timestamp
        .ok_or(ProviderError::MissingField("timestamp"))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .ok_or(ProviderError::MissingField("indicators.quote.close"))?;

    // Null closes (halted days) are skipped
    let points = timestamps
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let date = DateTime::<Utc>::from_timestamp(ts, 0)?.date_naive();
            Some(PricePoint::new(date, close?))
        })
        .collect();

    PriceSeries::new(points, PriceSource::Yahoo)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a client fetching one month of daily bars.
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, YAHOO_CHART_URL.to_string())
    }

    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch daily closes for a symbol.
    pub async fn get_daily_history(&self, symbol: &str) -> Result<PriceSeries, ProviderError> {
        let url = format!("{}/{}", self.base_url, normalize_yahoo_symbol(symbol));
        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::USER_AGENT,
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            )
            .query(&[
                ("range", YAHOO_RANGE),
                ("interval", "1d"),
                ("includePrePost", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        let body = response.text().await?;
        parse_chart(&body)
    }
}

#[async_trait]
impl Provider<PriceSeries> for YahooFinanceClient {
    fn name(&self) -> &str {
        "Yahoo"
    }

    async fn fetch(&self, ticker: &str) -> Result<PriceSeries, ProviderError> {
        self.get_daily_history(ticker).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // normalize_yahoo_symbol Tests
    // =========================================================================

    #[test]
    fn test_normalize_yahoo_symbol() {
        assert_eq!(normalize_yahoo_symbol("aapl"), "AAPL");
        assert_eq!(normalize_yahoo_symbol("BRK.B"), "BRK-B");
        assert_eq!(normalize_yahoo_symbol("BRK-B"), "BRK-B");
    }

    // =========================================================================
    // parse_chart Tests
    // =========================================================================

    #[test]
    fn test_parse_chart_skips_null_closes() {
        let body = r#"{
            "chart": {
                "result": [{
                    "meta": {"symbol": "MSFT"},
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": {"quote": [{
                        "open": [1.0, 1.0, 1.0],
                        "close": [370.87, null, 367.94]
                    }]}
                }],
                "error": null
            }
        }"#;

        let series = parse_chart(body).unwrap();
        assert_eq!(series.source(), PriceSource::Yahoo);
        assert_eq!(series.closes(), vec![370.87, 367.94]);
        assert_eq!(series.date_labels(), vec!["2024-01-02", "2024-01-04"]);
    }

    #[test]
    fn test_parse_chart_error() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;
        match parse_chart(body) {
            Err(ProviderError::Rejected(msg)) => assert!(msg.starts_with("Not Found")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_chart_missing_pieces() {
        let no_result = r#"{"chart": {"result": [], "error": null}}"#;
        assert!(matches!(
            parse_chart(no_result),
            Err(ProviderError::MissingField("chart.result"))
        ));

        let no_timestamps = r#"{"chart": {"result": [{"indicators": {"quote": [{}]}}], "error": null}}"#;
        assert!(matches!(
            parse_chart(no_timestamps),
            Err(ProviderError::MissingField("timestamp"))
        ));

        assert!(matches!(parse_chart(""), Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_client_name() {
        let client = YahooFinanceClient::new(Client::new());
        assert_eq!(client.name(), "Yahoo");
    }
}
