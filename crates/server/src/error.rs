use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use providers::ProviderError;
use serde::Serialize;
use thiserror::Error;

/// Errors a handler can surface to the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request rejected before any I/O.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// A third-party upstream failed; the consumer can distinguish
    /// "no data" from "transient upstream failure" via the fallback
    /// marker and decide whether to retry.
    #[error("{0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream { .. } => Self::Upstream(err.to_string()),
            ProviderError::UnsupportedMediaType(_)
            | ProviderError::UnsupportedCapability { .. }
            | ProviderError::InvalidRequest(_) => Self::BadRequest(err.to_string()),
        }
    }
}

/// Wire envelope: `{ "error": "...", "fallback": true }`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<bool>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, fallback) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, Some(true)),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };
        let message = match &self {
            // Don't leak database internals to the client.
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (
            status,
            Json(ErrorBody {
                error: message,
                fallback,
            }),
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_carry_the_fallback_marker() {
        let err = AppError::from(ProviderError::upstream("consumet", "metadata", "boom"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn capability_errors_are_client_errors() {
        let err = AppError::from(ProviderError::UnsupportedCapability {
            media_type: providers::MediaType::Manga,
            capability: "video streaming",
        });
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
