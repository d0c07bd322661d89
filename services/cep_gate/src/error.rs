//! Unified API error type — every 4xx/5xx response is JSON with a consistent shape.
//!
//! ```json
//! { "code": "timeout", "message": "timeout: no provider answered within 1000ms" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cep_runtime::ResolveError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    /// Provider behind the first failure, when the race saw one.
    pub provider: Option<String>,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: msg.into(),
            provider: None,
        }
    }

    pub fn bad_gateway(msg: impl Into<String>, provider: Option<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            code: "all_providers_failed",
            message: msg.into(),
            provider,
        }
    }

    pub fn gateway_timeout(msg: impl Into<String>, provider: Option<String>) -> Self {
        Self {
            status: StatusCode::GATEWAY_TIMEOUT,
            code: "timeout",
            message: msg.into(),
            provider,
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        let provider = err.first_failure().map(|f| f.provider.clone());
        let message = err.to_string();
        match err {
            ResolveError::InvalidInput(_) => Self::bad_request(message),
            ResolveError::AllFailed { .. } => Self::bad_gateway(message, provider),
            ResolveError::Timeout { .. } => Self::gateway_timeout(message, provider),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            code: self.code,
            message: self.message,
            provider: self.provider,
        };
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.status.as_u16(), self.code, self.message)
    }
}

impl std::error::Error for AppError {}
