pub mod cache;
pub mod fallback;
pub mod market_data;
pub mod news;
pub mod pipeline;
pub mod sentiment;
pub mod signals;

pub use cache::TickerCache;
pub use fallback::{ChainOutcome, FallbackChain, Provider, TerminalProvider};
pub use market_data::{MarketDataService, PriceLookup, StaticPriceProvider};
pub use news::{NewsService, StaticHeadlineProvider};
pub use pipeline::{normalize_ticker, SignalPipeline, SignalRequest};
pub use sentiment::{build_scorer, score_headlines, HeuristicScorer, ModelScorer, SentimentScorer};
