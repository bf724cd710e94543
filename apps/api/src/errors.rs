use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::advisor_client::AdvisorError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure path resolves to a navigable state for the caller: a screen
/// that is entered with missing upstream state gets a `MISSING_PREREQUISITE`
/// response naming the route that produces it, never a crash.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// A flow step was entered before the step that produces its input.
    #[error("{missing}")]
    MissingPrerequisite {
        missing: String,
        redirect_to: &'static str,
    },

    /// Transport failure or non-success response from the advisor service.
    #[error("Advisor error: {0}")]
    Advisor(#[from] AdvisorError),

    /// The advisor answered 2xx but the payload violated its own contract
    /// (e.g. a correct answer that is not among the options).
    #[error("Advisor data error: {0}")]
    AdvisorData(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::MissingPrerequisite {
                missing,
                redirect_to,
            } => {
                // Special body shape: include the producing route.
                let body = Json(json!({
                    "error": {
                        "code": "MISSING_PREREQUISITE",
                        "message": missing,
                        "redirect_to": redirect_to
                    }
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::Advisor(e) => {
                // Generic user-facing message; underlying cause stays in the logs.
                tracing::error!("Advisor call failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ADVISOR_UNAVAILABLE",
                    "Unable to load content. Please try again later.".to_string(),
                )
            }
            AppError::AdvisorData(msg) => {
                tracing::error!("Advisor returned malformed data: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ADVISOR_DATA_ERROR",
                    "Unable to load content. Please try again later.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Profile store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
