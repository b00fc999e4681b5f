use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::extract::GenerationError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is a 500 with a `{"detail": ...}` body; the failure kind is
/// only visible in the message text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("CV generation failed: {0}")]
    Cv(#[from] GenerationError),

    #[error("Letter generation failed: {0}")]
    Letter(#[from] LlmError),
}

impl AppError {
    /// Message returned to the client.
    pub fn detail(&self) -> String {
        match self {
            AppError::Cv(GenerationError::Parse(e)) => format!("JSON parsing error: {e}"),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.detail();
        match &self {
            AppError::Cv(e) => tracing::error!("CV generation error: {e}"),
            AppError::Letter(e) => tracing::error!("Letter generation error: {e}"),
        }

        let body = Json(json!({ "detail": detail }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
