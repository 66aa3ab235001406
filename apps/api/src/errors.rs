use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Failure to turn an uploaded or pasted document into a `DocumentEnvelope`.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Only .json files can be imported (got '{0}')")]
    NotJson(String),

    #[error("Invalid document JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Upload is empty")]
    Empty,
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("AI generation is not configured")]
    AiDisabled,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Import(ImportError::NotJson(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "NOT_JSON",
                self.to_string(),
            ),
            AppError::Import(e) => (StatusCode::BAD_REQUEST, "IMPORT_ERROR", e.to_string()),
            AppError::AiDisabled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI_DISABLED",
                "AI generation is not configured on this server".to_string(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    format!("AI generation failed: {e}"),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The document could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("slot".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("empty".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Import(ImportError::NotJson("cv.pdf".into())),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (AppError::Import(ImportError::Empty), StatusCode::BAD_REQUEST),
            (AppError::Llm(LlmError::EmptyContent), StatusCode::BAD_GATEWAY),
            (
                AppError::Render(RenderError::Font("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_malformed_json_is_bad_request() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let response = AppError::from(ImportError::from(parse_error)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
