use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::ApiMessage;
use crate::auth::{clear_session_cookie, token_from_cookies, SessionStore};

/// Destroys whatever session the cookie names and expires the cookie.
/// Succeeds even when no session existed.
pub fn logout(sessions: &SessionStore, headers: &HeaderMap) -> Response {
    if let Some(token) = token_from_cookies(headers) {
        sessions.destroy(&token);
    }

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(ApiMessage::ok("Logged out successfully.")),
    )
        .into_response()
}
