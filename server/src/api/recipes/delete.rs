use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::ApiMessage;
use crate::auth::CurrentUser;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::schema::recipes;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteForm {
    pub id: Option<String>,
}

/// Removes one owned recipe. An id that matches nothing is reported as a
/// failure, so the second of two identical deletes fails.
pub fn delete_recipe(
    pool: &DbPool,
    user: &CurrentUser,
    form: &DeleteForm,
) -> Result<Json<ApiMessage>, ApiError> {
    let raw_id = match form.id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ApiError::Validation("Missing recipe ID.")),
    };
    let id = raw_id.parse::<i32>().unwrap_or(0);

    let mut conn = get_conn(pool)?;

    let deleted = diesel::delete(
        recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::user_id.eq(user.user_id)),
    )
    .execute(&mut conn)
    .map_err(|e| {
        tracing::error!("Failed to delete recipe: {}", e);
        ApiError::Persistence("Error deleting recipe.")
    })?;

    if deleted == 0 {
        return Err(ApiError::NotFoundOrNotOwned);
    }

    Ok(Json(ApiMessage::ok("Recipe deleted successfully.")))
}
