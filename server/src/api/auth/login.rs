use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::prelude::*;

use super::CredentialsForm;
use crate::api::ApiMessage;
use crate::auth::{session_cookie, verify_password};
use crate::db::get_conn;
use crate::error::ApiError;
use crate::models::User;
use crate::schema::users;
use crate::AppState;

/// Username lookup is exact and case-sensitive.
pub fn login(state: &AppState, form: &CredentialsForm) -> Result<Response, ApiError> {
    let username = form.username.as_deref().unwrap_or("").trim();
    let password = form.password.as_deref().unwrap_or("").trim();

    let mut conn = get_conn(&state.pool)?;

    let user: User = match users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(&mut conn)
    {
        Ok(u) => u,
        Err(diesel::NotFound) => {
            return Err(ApiError::Auth("No account found with that username."))
        }
        Err(e) => {
            tracing::error!("Failed to look up user: {}", e);
            return Err(ApiError::Persistence("Error during login."));
        }
    };

    if !verify_password(password, &user.password_hash) {
        return Err(ApiError::Auth("Invalid password."));
    }

    let token = state.sessions.create(user.id, &user.username);
    let cookie = session_cookie(&token, state.sessions.ttl());

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiMessage::ok("Login successful!")),
    )
        .into_response())
}
