use axum::{extract::State, response::IntoResponse, response::Response, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::auth::otp;
use crate::config;
use crate::error::ApiError;
use crate::mailer::OtpPurpose;
use crate::state::AppState;

use super::utils::normalize_email;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequest {
    pub email: String,
}

/// POST /api/auth/resend-otp - issue a fresh verification code
pub async fn resend_otp(
    State(state): State<AppState>,
    Json(payload): Json<ResendOtpRequest>,
) -> Result<Response, ApiError> {
    let email = normalize_email(&payload.email);
    let security = &config::config().security;

    let user = super::utils::fetch_user_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.email_verified {
        return Err(ApiError::bad_request("Email is already verified"));
    }

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
        .send_otp(&user.email, &user.name, &code, OtpPurpose::Verification)
        .await?;
    tx.commit().await?;

    Ok(Json(json!({
        "success": true,
        "message": "OTP sent successfully to your email",
    }))
    .into_response())
}
