// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::game::{reveal::RevealError, session::SessionError};

/// Failure of a board, leaderboard or winner request.
///
/// Every variant renders as `{"error": <message>}`. Internal details are logged, and
/// the client only sees a generic message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database or filesystem failure.
    #[error("internal error: {0}")]
    InternalServerError(String),

    /// Rejected payload, such as a winner without a name.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Square id outside the current board.
    #[error("not found: {0}")]
    NotFound(String),

    /// The square is not waiting for this step, or another square holds the overlay.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong on the server".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// Unknown squares are 404; any out-of-order reveal step is 409.
impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match &err {
            SessionError::UnknownSquare(_) => AppError::NotFound(err.to_string()),
            SessionError::RevealInProgress(_)
            | SessionError::Reveal(RevealError::AlreadyCompleted)
            | SessionError::Reveal(RevealError::InvalidTransition { .. }) => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}
