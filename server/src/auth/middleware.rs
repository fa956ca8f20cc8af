use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::session::{token_from_cookies, SessionStore};
use crate::error::ApiError;

/// Middleware that requires a live session for all requests.
/// Apply this to routes that should be protected by default; it runs before
/// method dispatch, so even an unsupported method is rejected with 401 when
/// no session is presented.
pub async fn require_session(
    State(sessions): State<SessionStore>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let token = match token_from_cookies(request.headers()) {
        Some(t) => t,
        None => return ApiError::Unauthorized.into_response(),
    };

    if sessions.get(&token).is_none() {
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
