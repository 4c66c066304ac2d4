use axum::{extract::State, http::StatusCode, response::Response, Json};
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{otp, password};
use crate::database::models::user::User;
use crate::error::ApiError;
use crate::mailer::OtpPurpose;
use crate::state::AppState;

use super::utils::{normalize_email, validate_email_format, validate_password};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn validate_signup(payload: &SignupRequest) -> Result<(), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    validate_email_format(payload.email.trim())?;
    validate_password(&payload.password)?;
    Ok(())
}

/// POST /api/auth/signup - create an unverified account and mail its OTP
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Response, ApiError> {
    validate_signup(&payload)?;
    let email = normalize_email(&payload.email);

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&state.pool)
        .await?;
    if existing > 0 {
        return Err(ApiError::bad_request("User already exists with this email"));
    }

    let password_hash = password::hash_password(&payload.password)?;
    let code = otp::generate_otp();
    let now = Utc::now();

    let mut tx = state.pool.begin().await?;
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash, otp_code, otp_expires_at, last_otp_request_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(payload.name.trim())
    .bind(&email)
    .bind(&password_hash)
    .bind(&code)
    .bind(otp::otp_expiry(now))
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        // Unique violation: lost the race against a concurrent signup
        let duplicate = e
            .as_database_error()
            .and_then(|d| d.code())
            .map(|code| code == "23505")
            .unwrap_or(false);
        if duplicate {
            ApiError::bad_request("User already exists with this email")
        } else {
            ApiError::from(e)
        }
    })?;

    // A failed send aborts the transaction, leaving no orphan account
    state
        .mailer
        .send_otp(&user.email, &user.name, &code, OtpPurpose::Verification)
        .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully. Please check your email for OTP verification.",
            "data": {
                "userId": user.id,
                "email": user.email,
                "name": user.name,
            }
        })),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn rejects_blank_name() {
        assert!(validate_signup(&request("  ", "a@example.com", "long enough")).is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(validate_signup(&request("Asha", "not-an-email", "long enough")).is_err());
    }

    #[test]
    fn rejects_short_password() {
        assert!(validate_signup(&request("Asha", "a@example.com", "short")).is_err());
    }

    #[test]
    fn accepts_well_formed_signup() {
        assert!(validate_signup(&request("Asha", "a@example.com", "long enough")).is_ok());
    }
}
