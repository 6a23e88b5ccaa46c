use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Response for a request whose handler panicked.
///
/// Installed through `CatchPanicLayer` so a bug surfaces as a JSON 500
/// instead of a dropped connection.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Request handler panicked: {}", detail);

    AppError::Internal("unexpected failure while handling the request".to_string()).into_response()
}

/// Failure of a single upstream data source (prices or news).
///
/// These never leave the fallback chain: they are logged and the next
/// provider is tried.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Status(reqwest::StatusCode),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("missing field `{0}` in response")]
    MissingField(&'static str),

    #[error("upstream rejected request: {0}")]
    Rejected(String),

    #[error("provider returned no usable data")]
    Empty,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure to classify a single headline.
#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("classifier request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("classifier API error: {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected classifier output: {0}")]
    Parse(String),

    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}
