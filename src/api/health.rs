use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    sentiment_strategy: &'static str,
    price_providers: Vec<String>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sentiment_strategy: state.pipeline.sentiment_strategy().name(),
        price_providers: state.pipeline.market_data().provider_names(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok",
            version: "1.0.0",
            sentiment_strategy: "heuristic",
            price_providers: vec!["Yahoo".to_string(), "Fallback".to_string()],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(json.contains("\"sentimentStrategy\":\"heuristic\""));
        assert!(json.contains("\"priceProviders\":[\"Yahoo\",\"Fallback\"]"));
    }
}
