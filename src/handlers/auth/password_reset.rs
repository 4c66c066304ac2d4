use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{otp, password};
use crate::config;
use crate::error::ApiError;
use crate::mailer::OtpPurpose;
use crate::state::AppState;

use super::utils::{normalize_email, validate_password};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// POST /api/auth/forgot-password - mail a reset code without disclosing
/// whether the account exists
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Response, ApiError> {
    let email = normalize_email(&payload.email);
    let security = &config::config().security;

    let user = match super::utils::fetch_user_by_email(&state.pool, &email).await? {
        Some(user) => user,
        None => {
            return Ok(Json(json!({
                "success": true,
                "message": "If an account with that email exists, we have sent a password reset OTP",
            }))
            .into_response());
        }
    };

    let now = Utc::now();
    if !user.can_request_otp(now, security.otp_resend_cooldown_secs) {
        return Err(ApiError::too_many_requests(
            "Please wait 1 minute before requesting another OTP",
        ));
    }

    let code = otp::generate_otp();

    let mut tx = state.pool.begin().await?;
    sqlx::query(
        "UPDATE users
         SET otp_code = $1, otp_expires_at = $2, otp_attempts = 0,
             last_otp_request_at = $3, updated_at = now()
         WHERE id = $4",
    )
    .bind(&code)
    .bind(otp::otp_expiry(now))
    .bind(now)
    .bind(user.id)
    .execute(&mut *tx)
    .await?;

    state
        .mailer
        .send_otp(&user.email, &user.name, &code, OtpPurpose::PasswordReset)
        .await?;
    tx.commit().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Password reset OTP sent to your email",
    }))
    .into_response())
}

/// POST /api/auth/reset-password - OTP-gated password replacement
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Response, ApiError> {
    let email = normalize_email(&payload.email);
    let security = &config::config().security;

    validate_password(&payload.new_password)?;

    let user = super::utils::fetch_user_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

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

    let password_hash = password::hash_password(&payload.new_password)?;
    sqlx::query(
        "UPDATE users
         SET password_hash = $1, otp_code = NULL, otp_expires_at = NULL,
             otp_attempts = 0, updated_at = now()
         WHERE id = $2",
    )
    .bind(&password_hash)
    .bind(user.id)
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Password reset successfully. Please login with your new password.",
    }))
    .into_response())
}
