use axum::{extract::State, response::IntoResponse, response::Response, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::user::{PublicUser, User};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::{normalize_email, validate_email_format};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// GET /api/auth/profile
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Value> {
    let user = super::utils::fetch_user_by_id(&state.pool, auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(json!({ "user": PublicUser::from(&user) })))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Response, ApiError> {
    let name = match payload.name.as_deref().map(str::trim) {
        Some("") => return Err(ApiError::bad_request("Name cannot be empty")),
        other => other,
    };

    let email = match payload.email.as_deref() {
        Some(raw) => {
            validate_email_format(raw.trim())?;
            let email = normalize_email(raw);
            let taken = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM users WHERE email = $1 AND id <> $2",
            )
            .bind(&email)
            .bind(auth.id)
            .fetch_one(&state.pool)
            .await?;
            if taken > 0 {
                return Err(ApiError::bad_request(
                    "Email is already taken by another user",
                ));
            }
            Some(email)
        }
        None => None,
    };

    let user = sqlx::query_as::<_, User>(
        "UPDATE users
         SET name = COALESCE($1, name), email = COALESCE($2, email), updated_at = now()
         WHERE id = $3
         RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(auth.id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "data": { "user": PublicUser::from(&user) },
    }))
    .into_response())
}
