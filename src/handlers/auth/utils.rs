use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::models::user::{PublicUser, User};
use crate::error::ApiError;

/// Canonical form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal shape check; deliverability is proven by the OTP round trip.
pub fn validate_email_format(email: &str) -> Result<(), ApiError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    let min = crate::config::config().security.min_password_length;
    if password.len() < min {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            min
        )));
    }
    Ok(())
}

pub async fn fetch_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn fetch_user_by_id(pool: &PgPool, id: uuid::Uuid) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Token + public profile payload returned by login and verification.
pub fn session_payload(token: String, user: &User) -> Value {
    json!({
        "token": token,
        "user": PublicUser::from(user),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_normalization() {
        assert_eq!(normalize_email("  Asha@Example.COM "), "asha@example.com");
    }

    #[test]
    fn email_format_check() {
        assert!(validate_email_format("asha@example.com").is_ok());
        assert!(validate_email_format("asha").is_err());
        assert!(validate_email_format("@example.com").is_err());
        assert!(validate_email_format("asha@nodot").is_err());
    }

    #[test]
    fn password_length_check() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough password").is_ok());
    }
}
