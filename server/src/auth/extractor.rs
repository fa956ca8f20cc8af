use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use super::session::{token_from_cookies, SessionStore};
use crate::error::ApiError;

/// Extractor that resolves the session cookie to the authenticated identity.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> impl IntoResponse {
///     // user.user_id scopes every query
/// }
/// ```
pub struct CurrentUser {
    pub user_id: i32,
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionStore::from_ref(state);

        let token = token_from_cookies(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let session = sessions.get(&token).ok_or(ApiError::Unauthorized)?;

        Ok(CurrentUser {
            user_id: session.user_id,
            username: session.username,
        })
    }
}
