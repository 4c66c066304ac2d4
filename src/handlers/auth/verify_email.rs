use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, otp, Claims};
use crate::config;
use crate::database::models::user::User;
use crate::error::ApiError;
use crate::state::AppState;

use super::utils::{normalize_email, session_payload};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub email: String,
    pub otp: String,
}

/// POST /api/auth/verify-email - prove control of the address and start a session
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<Response, ApiError> {
    let email = normalize_email(&payload.email);
    let security = &config::config().security;

    let user = super::utils::fetch_user_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.email_verified {
        return Err(ApiError::bad_request("Email is already verified"));
    }

    if user.otp_locked(security.otp_max_attempts) {
        return Err(ApiError::too_many_requests(
            "Too many failed attempts. Please request a new OTP.",
        ));
    }

    let now = Utc::now();
    if !otp::otp_is_valid(
        user.otp_code.as_deref(),
        user.otp_expires_at,
        payload.otp.trim(),
        now,
    ) {
        let attempts = user.otp_attempts + 1;
        sqlx::query("UPDATE users SET otp_attempts = $1, updated_at = now() WHERE id = $2")
            .bind(attempts)
            .bind(user.id)
            .execute(&state.pool)
            .await?;

        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": true,
                "message": "Invalid or expired OTP",
                "code": "INVALID_OTP",
                "attemptsLeft": (security.otp_max_attempts - attempts).max(0),
            })),
        )
            .into_response());
    }

    let user = sqlx::query_as::<_, User>(
        "UPDATE users
         SET email_verified = TRUE, otp_code = NULL, otp_expires_at = NULL,
             otp_attempts = 0, updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(user.id)
    .fetch_one(&state.pool)
    .await?;

    // Welcome mail is best-effort; verification already succeeded
    if let Err(e) = state.mailer.send_welcome(&user.email, &user.name).await {
        tracing::warn!("failed to send welcome mail: {}", e);
    }

    let token = generate_jwt(Claims::new(user.id))?;

    Ok(Json(json!({
        "success": true,
        "message": "Email verified successfully",
        "data": session_payload(token, &user),
    }))
    .into_response())
}
