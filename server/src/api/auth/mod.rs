pub mod check;
pub mod login;
pub mod logout;
pub mod signup;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

use crate::api::{resolve_action, ActionQuery, ApiMessage};
use crate::error::ApiError;
use crate::AppState;

/// Returns the router for the /auth endpoint (signup, login, logout, check)
pub fn router() -> Router<AppState> {
    Router::new().route("/auth", post(handle_post).get(handle_get))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CredentialsForm {
    pub action: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[utoipa::path(
    post,
    path = "/auth",
    tag = "auth",
    params(ActionQuery),
    request_body(
        content = CredentialsForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Credentials plus the action (signup or login); a body action overrides the query string"
    ),
    responses(
        (status = 200, description = "Operation outcome; success=false carries the reason", body = ApiMessage)
    )
)]
pub async fn handle_post(
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let action = resolve_action(form.action.as_deref(), query.action.as_deref());

    match action {
        "signup" => signup::signup(&state.pool, &form).into_response(),
        "login" => login::login(&state, &form).into_response(),
        _ => ApiError::Validation("Unknown action.").into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/auth",
    tag = "auth",
    params(ActionQuery),
    responses(
        (status = 200, description = "Logout outcome, or session status for action=check")
    )
)]
pub async fn handle_get(
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
    headers: HeaderMap,
) -> Response {
    match query.action.as_deref().unwrap_or("") {
        "logout" => logout::logout(&state.sessions, &headers).into_response(),
        "check" => check::check(&state.sessions, &headers).into_response(),
        _ => ApiError::Validation("Unknown action.").into_response(),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handle_post, handle_get),
    components(schemas(CredentialsForm, check::CheckResponse))
)]
pub struct ApiDoc;
