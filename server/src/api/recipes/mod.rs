pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::{Form, Json};
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::{resolve_action, ActionQuery, ApiMessage};
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// Returns the method router for the /recipes endpoint. The session guard
/// is layered on top of it in `app()`, so requests without a live session
/// are rejected with 401 before dispatch, whatever the method.
pub fn method_router() -> MethodRouter<AppState> {
    get(handle_get)
        .post(handle_post)
        .delete(handle_delete)
        .fallback(method_not_allowed)
}

/// Form body shared by create and update; update additionally reads `id`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeForm {
    pub action: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecipeQuery {
    /// When present, the response is that single recipe instead of the list
    pub id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    params(RecipeQuery),
    responses(
        (status = 200, description = "The recipe list, a single recipe, or a failure envelope"),
        (status = 401, description = "No live session", body = ApiMessage)
    ),
    security(("session_cookie" = []))
)]
pub async fn handle_get(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Response {
    match query.id {
        Some(ref raw_id) => get::get_recipe(&state.pool, &user, raw_id).into_response(),
        None => list::list_recipes(&state.pool, &user).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    params(ActionQuery),
    request_body(
        content = RecipeForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Recipe fields plus the action (create or update); a body action overrides the query string"
    ),
    responses(
        (status = 200, description = "Operation outcome; success=false carries the reason", body = ApiMessage),
        (status = 401, description = "No live session", body = ApiMessage)
    ),
    security(("session_cookie" = []))
)]
pub async fn handle_post(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
    Form(form): Form<RecipeForm>,
) -> Response {
    let action = resolve_action(form.action.as_deref(), query.action.as_deref());

    match action {
        "create" => create::create_recipe(&state.pool, &user, &form).into_response(),
        "update" => update::update_recipe(&state.pool, &user, &form).into_response(),
        _ => ApiError::Validation("Unknown action.").into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/recipes",
    tag = "recipes",
    request_body(
        content = delete::DeleteForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Operation outcome; success=false carries the reason", body = ApiMessage),
        (status = 401, description = "No live session", body = ApiMessage)
    ),
    security(("session_cookie" = []))
)]
pub async fn handle_delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<delete::DeleteForm>,
) -> Response {
    delete::delete_recipe(&state.pool, &user, &form).into_response()
}

/// Fallback for methods the endpoint does not dispatch (PUT, PATCH, ...).
/// Reached only by authenticated requests; the guard answers first otherwise.
async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiMessage {
            success: false,
            message: "Request method not supported.".to_string(),
        }),
    )
        .into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(handle_get, handle_post, handle_delete),
    components(schemas(
        RecipeForm,
        delete::DeleteForm,
        list::ListRecipesResponse,
        list::RecipeSummary,
        get::GetRecipeResponse,
        get::RecipeDetail,
    ))
)]
pub struct ApiDoc;
