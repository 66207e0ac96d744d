use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use timeslot_core::error::CoreError;
use timeslot_db::DbError;

use crate::auth::jwt::TokenError;

/// Application-level error type for services and HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
/// caller mistakes become 4xx, store failures 5xx.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `timeslot_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store error from `timeslot_db`.
    #[error(transparent)]
    Db(#[from] DbError),

    /// A rejected session token.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler and service return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl AppError {
    /// HTTP status, machine-readable code and client-facing message.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },
            AppError::Db(err) => classify_db_error(err),
            AppError::Token(TokenError::Signing(msg)) => internal(msg),
            AppError::Token(_) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid or expired token".to_string(),
            ),
            AppError::InternalError(msg) => internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Log the detail and hand the client a sanitized 500.
fn internal(detail: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Empty updates and rows rejected by NOT NULL or CHECK constraints map to 400.
/// - `NotFound` maps to 404 whether the row is missing or foreign.
/// - Unique and foreign-key violations map to 409.
/// - Transaction and query failures map to 500 with a sanitized message.
fn classify_db_error(err: &DbError) -> (StatusCode, &'static str, String) {
    match err {
        DbError::EmptyUpdate => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Update structure has no values".to_string(),
        ),
        DbError::Validation { constraint, .. } => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Request violates constraint: {constraint}"),
        ),
        DbError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} not found"),
        ),
        DbError::ConstraintViolation { constraint, .. } => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Request violates constraint: {constraint}"),
        ),
        DbError::TransactionFailure { .. } | DbError::Query(_) => internal(&err.to_string()),
    }
}
