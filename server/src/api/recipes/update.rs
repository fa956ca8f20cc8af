use axum::Json;
use diesel::prelude::*;

use super::RecipeForm;
use crate::api::ApiMessage;
use crate::auth::CurrentUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::schema::recipes;

/// Rewrites the three mutable fields of one owned recipe. The ownership
/// check and the write are a single statement; zero affected rows means
/// the id does not exist or is not yours, and is reported as a failure.
pub fn update_recipe(
    pool: &DbPool,
    user: &CurrentUser,
    form: &RecipeForm,
) -> Result<Json<ApiMessage>, ApiError> {
    let id = form
        .id
        .as_deref()
        .unwrap_or("")
        .trim()
        .parse::<i32>()
        .unwrap_or(0);
    let title = form.title.as_deref().unwrap_or("").trim();
    let ingredients = form.ingredients.as_deref().unwrap_or("").trim();
    let instructions = form.instructions.as_deref().unwrap_or("").trim();

    let mut conn = get_conn(pool)?;

    let updated = diesel::update(
        recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::user_id.eq(user.user_id)),
    )
    .set((
        recipes::title.eq(title),
        recipes::ingredients.eq(ingredients),
        recipes::instructions.eq(instructions),
    ))
    .execute(&mut conn)
    .map_err(|e| {
        tracing::error!("Failed to update recipe: {}", e);
        ApiError::Persistence("Error updating recipe.")
    })?;

    if updated == 0 {
        return Err(ApiError::NotFoundOrNotOwned);
    }

    Ok(Json(ApiMessage::ok("Recipe updated successfully.")))
}
