use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::locator::geolocation::GeoError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Storage failures never reach handlers; the autosave scheduler reports them
/// through its status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A generative-model call failed or returned something unusable.
    /// `message` is user-facing, `detail` only goes to the logs.
    #[error("Collaborator error: {message} ({detail})")]
    Collaborator { message: String, detail: String },

    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeoError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn collaborator(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        AppError::Collaborator {
            message: message.into(),
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Collaborator { message, detail } => {
                tracing::error!("Collaborator error: {detail}");
                (StatusCode::BAD_GATEWAY, "COLLABORATOR_ERROR", message.clone())
            }
            AppError::Geolocation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "GEOLOCATION_ERROR",
                e.user_message().to_string(),
            ),
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
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_collaborator_maps_to_bad_gateway() {
        let response = AppError::collaborator("Impossible", "timeout").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_geolocation_maps_to_unprocessable() {
        let response = AppError::from(GeoError::PermissionDenied).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
