//! # Centralized Error Handling
//!
//! This module provides a unified error handling system for the application.
//! It centralizes error logging and HTTP response generation, so services can
//! return [`AppError`] with `?` and handlers never build error responses by hand.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Central application error type that encompasses all possible error conditions.
///
/// Every variant maps to exactly one HTTP status. _Db errors are logged
/// automatically, while other errors should be logged at the point of creation if needed._
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("migration error")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("UUID parsing error")]
    Uuid(#[from] uuid::Error),

    /// Malformed or ineligible slot, or a bad payload shape.
    #[error("validation error: {0}")]
    Validation(&'static str),

    /// An operation that can never succeed for the given arguments (e.g. liking yourself).
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Db(e) => error!(?e, "Database error occurred"),
            AppError::Migrate(e) => error!(?e, "Migration error occurred"),
            _ => {}
        }

        let (status, message) = match self {
            AppError::Db(_) | AppError::Migrate(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AppError::Uuid(_) => (StatusCode::BAD_REQUEST, "Invalid UUID format"),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidOperation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(ErrorBody { message });
        (status, body).into_response()
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
