//! API error type and response mapping.

use crate::validation::FieldError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tally_auth::AuthError;
use tally_ledger::LedgerError;
use thiserror::Error;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No Authorization header on a protected route.
    #[error("Access token required")]
    MissingToken,

    /// Bearer credential failed signature or expiry checks.
    #[error("Invalid or expired token")]
    InvalidCredential,

    /// Request payload failed validation.
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// Malformed request outside the validation schemas.
    #[error("{0}")]
    BadRequest(String),

    /// Authentication failure from the core.
    #[error(transparent)]
    Auth(AuthError),

    /// Ledger failure.
    #[error(transparent)]
    Ledger(LedgerError),

    /// Anything else; detail stays server-side.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidOrExpiredCredential => ApiError::InvalidCredential,
            other => ApiError::Auth(other),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        ApiError::Ledger(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::InvalidCredential => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error".to_string()),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            // One message for missing, used, and expired links: redemption
            // failures must not reveal which case was hit.
            ApiError::Auth(AuthError::InvalidOrExpiredToken) => (
                StatusCode::BAD_REQUEST,
                "Invalid or expired magic link".to_string(),
            ),
            ApiError::Ledger(LedgerError::ExpenseNotFound) => {
                (StatusCode::NOT_FOUND, "Expense not found".to_string())
            }
            ApiError::Ledger(LedgerError::UserNotFound) => {
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = match self {
            ApiError::Validation(details) => json!({
                "status": "error",
                "message": message,
                "details": details,
            }),
            _ => json!({ "status": "error", "message": message }),
        };

        (status, Json(body)).into_response()
    }
}
