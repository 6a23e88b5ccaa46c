//! tickersignal - RSI and headline-sentiment trading signals for stock tickers

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::SignalPipeline;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<SignalPipeline>,
}

impl AppState {
    pub fn new(config: Arc<Config>, pipeline: Arc<SignalPipeline>) -> Self {
        Self { config, pipeline }
    }

    /// Build the pipeline described by `config`.
    pub fn from_config(config: Config) -> Result<Self, reqwest::Error> {
        let pipeline = SignalPipeline::from_config(&config)?;
        Ok(Self::new(Arc::new(config), Arc::new(pipeline)))
    }
}

/// Build the HTTP application with panic recovery, CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use types::*;
