//! Daily price acquisition.
//!
//! Alpha Vantage, then Financial Modeling Prep, then Yahoo Finance, then a
//! bundled placeholder series. Providers without a configured key are left
//! out of the chain. Live results are cached per ticker.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::services::cache::TickerCache;
use crate::services::fallback::{FallbackChain, Provider, TerminalProvider};
use crate::sources::{http_client, AlphaVantageClient, FmpClient, YahooFinanceClient};
use crate::types::PriceSeries;

/// Terminal provider returning [`PriceSeries::fallback`] anchored on today.
pub struct StaticPriceProvider {
    today: Option<NaiveDate>,
}

impl StaticPriceProvider {
    pub fn new() -> Self {
        Self { today: None }
    }

    /// Pin the anchor date instead of using the local calendar date.
    pub fn anchored(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }
}

impl Default for StaticPriceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalProvider<PriceSeries> for StaticPriceProvider {
    fn name(&self) -> &str {
        "Fallback"
    }

    fn fetch(&self, _ticker: &str) -> PriceSeries {
        PriceSeries::fallback(self.today.unwrap_or_else(|| Local::now().date_naive()))
    }
}

/// Result of a price lookup.
#[derive(Debug, Clone)]
pub struct PriceLookup {
    pub series: PriceSeries,
    /// Served from the cache without touching any provider.
    pub cached: bool,
}

/// Price acquisition with fallback and caching.
pub struct MarketDataService {
    chain: FallbackChain<PriceSeries>,
    cache: Arc<TickerCache<PriceSeries>>,
}

impl MarketDataService {
    pub fn new(chain: FallbackChain<PriceSeries>, cache: Arc<TickerCache<PriceSeries>>) -> Self {
        Self { chain, cache }
    }

    /// Build the standard provider chain from configuration.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = http_client(config.provider_timeout)?;
        let mut chain: FallbackChain<PriceSeries> =
            FallbackChain::new(Arc::new(StaticPriceProvider::new()), config.provider_timeout);

        if let Some(ref key) = config.alpha_vantage_api_key {
            chain = chain.with_provider(Arc::new(AlphaVantageClient::new(client.clone(), key.clone())));
        }
        if let Some(ref key) = config.fmp_api_key {
            chain = chain.with_provider(Arc::new(FmpClient::new(client.clone(), key.clone())));
        }
        if config.yahoo_enabled {
            let yahoo: Arc<dyn Provider<PriceSeries>> = Arc::new(YahooFinanceClient::new(client));
            chain = chain.with_provider(yahoo);
        }

        info!("Price provider chain: {}", chain.provider_names().join(" -> "));

        Ok(Self::new(chain, Arc::new(TickerCache::new(config.price_cache_ttl))))
    }

    pub fn cache(&self) -> Arc<TickerCache<PriceSeries>> {
        self.cache.clone()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.chain.provider_names()
    }

    /// Fetch daily closes for `ticker`. Never fails and never returns an
    /// empty series.
    pub async fn fetch_prices(&self, ticker: &str) -> PriceLookup {
        if let Some(series) = self.cache.get(ticker) {
            debug!("Price cache hit for {}", ticker);
            return PriceLookup {
                series,
                cached: true,
            };
        }

        let outcome = self.chain.fetch(ticker).await;

        // Placeholder data must not hide a recovered provider.
        if !outcome.from_terminal {
            self.cache.insert(ticker, outcome.value.clone());
        }

        PriceLookup {
            series: outcome.value,
            cached: false,
        }
    }
}
