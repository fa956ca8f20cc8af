use axum::Json;
use diesel::prelude::*;

use super::RecipeForm;
use crate::api::ApiMessage;
use crate::auth::CurrentUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::NewRecipe;
use crate::schema::recipes;

/// Inserts a recipe owned by the current user. Fields are trimmed but not
/// otherwise validated; an empty title is storable.
pub fn create_recipe(
    pool: &DbPool,
    user: &CurrentUser,
    form: &RecipeForm,
) -> Result<Json<ApiMessage>, ApiError> {
    let new_recipe = NewRecipe {
        user_id: user.user_id,
        title: form.title.as_deref().unwrap_or("").trim(),
        ingredients: form.ingredients.as_deref().unwrap_or("").trim(),
        instructions: form.instructions.as_deref().unwrap_or("").trim(),
    };

    let mut conn = get_conn(pool)?;

    diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .execute(&mut conn)
        .map_err(|e| {
            tracing::error!("Failed to insert recipe: {}", e);
            ApiError::Persistence("Error adding recipe.")
        })?;

    Ok(Json(ApiMessage::ok("Recipe added successfully!")))
}
