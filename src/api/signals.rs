//! Signal API endpoints.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::SignalRequest;
use crate::types::SignalReport;
use crate::AppState;

/// API response wrapper.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Serialize)]
pub struct ApiMeta {
    /// Prices were served from the cache.
    pub cached: bool,
}

impl<T> ApiResponse<T> {
    fn new(data: T, cached: bool) -> Self {
        Self {
            data,
            meta: ApiMeta { cached },
        }
    }
}

/// Optional tunables accepted by both signal routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalsQuery {
    /// Ticker symbol; ignored on the `/:ticker` route.
    pub ticker: Option<String>,
    pub sentiment_threshold: Option<f64>,
    pub oversold_rsi: Option<f64>,
    pub overbought_rsi: Option<f64>,
    /// NewsAPI key for this request only.
    pub news_api_key: Option<String>,
}

impl SignalsQuery {
    fn into_request(self, ticker: Option<String>) -> SignalRequest {
        SignalRequest {
            ticker: ticker.or(self.ticker),
            sentiment_threshold: self.sentiment_threshold,
            oversold_rsi: self.oversold_rsi,
            overbought_rsi: self.overbought_rsi,
            news_api_key: self.news_api_key,
        }
    }
}

/// Create the signals router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_signals))
        .route("/:ticker", get(get_ticker_signals))
}

/// Query tunables; a malformed value is a JSON 400 like any other bad input.
type TunablesQuery = std::result::Result<Query<SignalsQuery>, QueryRejection>;

/// Signal for `?ticker=` (MSFT when absent).
async fn get_signals(
    State(state): State<AppState>,
    query: TunablesQuery,
) -> Result<Json<ApiResponse<SignalReport>>> {
    let Query(query) = query?;
    analyze(&state, query.into_request(None)).await
}

/// Signal for the ticker in the path.
async fn get_ticker_signals(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    query: TunablesQuery,
) -> Result<Json<ApiResponse<SignalReport>>> {
    let Query(query) = query?;
    analyze(&state, query.into_request(Some(ticker))).await
}

async fn analyze(state: &AppState, request: SignalRequest) -> Result<Json<ApiResponse<SignalReport>>> {
    let (report, cached) = state.pipeline.analyze(&request).await?;
    Ok(Json(ApiResponse::new(report, cached)))
}
