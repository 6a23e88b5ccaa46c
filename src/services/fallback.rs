//! Ordered provider fallback.
//!
//! A [`FallbackChain`] tries each [`Provider`] in priority order and returns
//! the first success. When every provider fails (or none is configured) it
//! answers from a terminal provider that cannot fail. Used for both price
//! series and news headlines.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ProviderError;

/// A fallible upstream source keyed by ticker.
#[async_trait]
pub trait Provider<T>: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch data for `ticker`.
    async fn fetch(&self, ticker: &str) -> Result<T, ProviderError>;
}

/// Last resort of a chain; always produces a value.
pub trait TerminalProvider<T>: Send + Sync {
    fn name(&self) -> &str;

    fn fetch(&self, ticker: &str) -> T;
}

/// Which provider answered, and with what.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutcome<T> {
    pub value: T,
    pub provider: String,
    /// True when the terminal provider answered.
    pub from_terminal: bool,
}

/// First-success-wins combinator over an ordered provider list.
pub struct FallbackChain<T> {
    providers: Vec<Arc<dyn Provider<T>>>,
    terminal: Arc<dyn TerminalProvider<T>>,
    attempt_timeout: Duration,
}

impl<T: Send + 'static> FallbackChain<T> {
    /// Create a chain with only the terminal provider.
    pub fn new(terminal: Arc<dyn TerminalProvider<T>>, attempt_timeout: Duration) -> Self {
        Self {
            providers: Vec::new(),
            terminal,
            attempt_timeout,
        }
    }

    /// Append a provider; providers are tried in insertion order.
    pub fn with_provider(mut self, provider: Arc<dyn Provider<T>>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Names of the configured providers, in order, terminal last.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|p| p.name().to_string())
            .chain(std::iter::once(self.terminal.name().to_string()))
            .collect()
    }

    /// Try every provider in order; fall back to the terminal provider.
    ///
    /// Each attempt is bounded by the chain's timeout. Errors are logged and
    /// never returned.
    pub async fn fetch(&self, ticker: &str) -> ChainOutcome<T> {
        for provider in &self.providers {
            debug!("[{}] Fetching {}", provider.name(), ticker);

            let result = match tokio::time::timeout(self.attempt_timeout, provider.fetch(ticker)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(self.attempt_timeout)),
            };

            match result {
                Ok(value) => {
                    debug!("[{}] Served {}", provider.name(), ticker);
                    return ChainOutcome {
                        value,
                        provider: provider.name().to_string(),
                        from_terminal: false,
                    };
                }
                Err(e) => {
                    warn!("[{}] Failed for {}: {}", provider.name(), ticker, e);
                }
            }
        }

        info!("Using {} data for {}", self.terminal.name(), ticker);
        ChainOutcome {
            value: self.terminal.fetch(ticker),
            provider: self.terminal.name().to_string(),
            from_terminal: true,
        }
    }
}
