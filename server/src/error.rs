use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::ApiMessage;

/// Failure outcomes the API reports to clients.
///
/// Everything except `Unauthorized` is a normal 200 with `success: false`:
/// these are user-correctable or expected outcomes, not transport errors.
/// `NotFoundOrNotOwned` deliberately covers both a nonexistent id and an id
/// owned by someone else so callers cannot probe for other users' records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("{0}")]
    Auth(&'static str),
    #[error("Unauthorized access. Please log in.")]
    Unauthorized,
    #[error("Recipe not found or you don't own it.")]
    NotFoundOrNotOwned,
    /// Store unreachable or a statement failed; the underlying detail is
    /// logged where it happens and never sent to the client.
    #[error("{0}")]
    Persistence(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::OK,
        };
        let body = ApiMessage {
            success: false,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
