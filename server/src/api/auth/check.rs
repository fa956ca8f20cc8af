use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{token_from_cookies, SessionStore};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckResponse {
    pub logged_in: bool,
    pub username: Option<String>,
}

/// Pure read of the session state; never fails.
pub fn check(sessions: &SessionStore, headers: &HeaderMap) -> Json<CheckResponse> {
    let session = token_from_cookies(headers).and_then(|token| sessions.get(&token));

    Json(match session {
        Some(s) => CheckResponse {
            logged_in: true,
            username: Some(s.username),
        },
        None => CheckResponse {
            logged_in: false,
            username: None,
        },
    })
}
