pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod telemetry;

use axum::extract::FromRef;
use axum::middleware;
use axum::Router;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::SessionStore;
use crate::db::DbPool;

/// Application state shared across all handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: DbPool,
    pub sessions: SessionStore,
}

/// Builds the complete application router for the given state.
pub fn app(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_router = api::auth::router();

    // Protected routes (session required for every method)
    let protected_router = Router::new()
        .route("/recipes", api::recipes::method_router())
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            auth::require_session,
        ));

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(public_router)
        .merge(protected_router)
        .merge(swagger_ui)
        .with_state(state)
}
