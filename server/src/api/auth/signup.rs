use axum::Json;
use diesel::prelude::*;

use super::CredentialsForm;
use crate::api::ApiMessage;
use crate::auth::hash_password;
use crate::db::{get_conn, DbPool};
use crate::error::ApiError;
use crate::models::NewUser;
use crate::schema::users;

/// Creates the account but does not log it in; the client follows up with
/// a login call.
pub fn signup(pool: &DbPool, form: &CredentialsForm) -> Result<Json<ApiMessage>, ApiError> {
    let username = form.username.as_deref().unwrap_or("").trim();
    let password = form.password.as_deref().unwrap_or("").trim();

    if username.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Please fill all fields."));
    }

    let password_hash = hash_password(password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::Persistence("Error during signup.")
    })?;

    let new_user = NewUser {
        username,
        password_hash: &password_hash,
    };

    let mut conn = get_conn(pool)?;

    match diesel::insert_into(users::table)
        .values(&new_user)
        .execute(&mut conn)
    {
        Ok(_) => Ok(Json(ApiMessage::ok("Signup successful! You can now log in."))),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => Err(ApiError::Conflict("Username already exists.")),
        Err(e) => {
            tracing::error!("Failed to insert user: {}", e);
            Err(ApiError::Persistence("Error during signup."))
        }
    }
}
