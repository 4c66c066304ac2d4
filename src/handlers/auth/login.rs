use axum::{extract::State, response::IntoResponse, response::Response, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, password, Claims};
use crate::database::models::user::User;
use crate::error::ApiError;
use crate::state::AppState;

use super::utils::{normalize_email, session_payload};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login - authenticate and receive a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let email = normalize_email(&payload.email);

    // Same message for unknown email and bad password
    let user = super::utils::fetch_user_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !user.email_verified {
        return Err(ApiError::unauthorized(
            "Please verify your email before logging in",
        ));
    }

    if !password::verify_password(&payload.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET last_login_at = now(), updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(user.id)
    .fetch_one(&state.pool)
    .await?;

    let token = generate_jwt(Claims::new(user.id))?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "data": session_payload(token, &user),
    }))
    .into_response())
}

/// POST /api/auth/logout - stateless acknowledgement; tokens expire on their own
pub async fn logout() -> Response {
    Json(json!({
        "success": true,
        "message": "Logged out successfully",
    }))
    .into_response()
}
