use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::schema::recipes;

#[derive(Debug, Clone, Queryable, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub success: bool,
    pub recipes: Vec<RecipeSummary>,
}

/// Returns all of the current user's recipes, newest first. An empty list
/// is a valid success.
pub fn list_recipes(
    pool: &DbPool,
    user: &CurrentUser,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let mut conn = get_conn(pool)?;

    // id breaks ties so rows created in the same instant still list
    // newest first
    let recipes = recipes::table
        .filter(recipes::user_id.eq(user.user_id))
        .order((recipes::created_at.desc(), recipes::id.desc()))
        .select((
            recipes::id,
            recipes::title,
            recipes::ingredients,
            recipes::instructions,
            recipes::created_at,
        ))
        .load::<RecipeSummary>(&mut conn)
        .map_err(|e| {
            tracing::error!("Failed to fetch recipes: {}", e);
            ApiError::Persistence("Error fetching recipes.")
        })?;

    Ok(Json(ListRecipesResponse {
        success: true,
        recipes,
    }))
}
