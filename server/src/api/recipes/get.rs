use axum::Json;
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::schema::recipes;

#[derive(Debug, Clone, Queryable, Serialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GetRecipeResponse {
    pub success: bool,
    pub recipe: RecipeDetail,
}

/// Fetches one recipe scoped by id AND owner. A missing id and a foreign
/// id are indistinguishable to the caller.
pub fn get_recipe(
    pool: &DbPool,
    user: &CurrentUser,
    raw_id: &str,
) -> Result<Json<GetRecipeResponse>, ApiError> {
    // Unparseable ids match nothing, the same as an id that is not yours
    let id = raw_id.trim().parse::<i32>().unwrap_or(0);

    let mut conn = get_conn(pool)?;

    let recipe: RecipeDetail = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(user.user_id))
        .select((
            recipes::id,
            recipes::title,
            recipes::ingredients,
            recipes::instructions,
        ))
        .first(&mut conn)
    {
        Ok(r) => r,
        Err(diesel::NotFound) => return Err(ApiError::NotFoundOrNotOwned),
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return Err(ApiError::Persistence("Error fetching recipe."));
        }
    };

    Ok(Json(GetRecipeResponse {
        success: true,
        recipe,
    }))
}
