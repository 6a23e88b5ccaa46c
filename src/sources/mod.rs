pub mod alphavantage;
pub mod fmp;
pub mod huggingface;
pub mod newsapi;
pub mod yahoo;

pub use alphavantage::AlphaVantageClient;
pub use fmp::FmpClient;
pub use huggingface::HuggingFaceClient;
pub use newsapi::NewsApiClient;
pub use yahoo::YahooFinanceClient;

use reqwest::Client;
use std::time::Duration;

/// Build an HTTP client whose every request is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
