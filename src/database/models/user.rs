use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::text_enum;

text_enum!(UserRole {
    User => "user",
    Admin => "admin",
    Owner => "owner",
});

/// Full account row, including credential and OTP state. Never serialized to
/// clients; see [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub email_verified: bool,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub otp_attempts: i32,
    pub last_otp_request_at: Option<DateTime<Utc>>,
    pub coin_balance: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the attempt counter has exhausted the configured cap.
    pub fn otp_locked(&self, max_attempts: i32) -> bool {
        self.otp_attempts >= max_attempts
    }

    /// Whether enough time has passed since the last OTP to issue another.
    pub fn can_request_otp(&self, now: DateTime<Utc>, cooldown_secs: i64) -> bool {
        match self.last_otp_request_at {
            Some(last) => now - last >= Duration::seconds(cooldown_secs),
            None => true,
        }
    }
}

/// Client-facing account view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_email_verified: bool,
    pub role: UserRole,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_email_verified: user.email_verified,
            role: user.role,
            last_login: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role: UserRole::User,
            email_verified: false,
            otp_code: Some("123456".to_string()),
            otp_expires_at: Some(Utc::now() + Duration::minutes(10)),
            otp_attempts: 0,
            last_otp_request_at: Some(Utc::now()),
            coin_balance: 0,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn otp_lockout_at_cap() {
        let mut user = sample_user();
        assert!(!user.otp_locked(5));
        user.otp_attempts = 5;
        assert!(user.otp_locked(5));
    }

    #[test]
    fn otp_resend_cooldown() {
        let mut user = sample_user();
        let now = Utc::now();
        user.last_otp_request_at = Some(now - Duration::seconds(10));
        assert!(!user.can_request_otp(now, 60));
        user.last_otp_request_at = Some(now - Duration::seconds(61));
        assert!(user.can_request_otp(now, 60));
        user.last_otp_request_at = None;
        assert!(user.can_request_otp(now, 60));
    }

    #[test]
    fn public_view_carries_no_secrets() {
        let user = sample_user();
        let public = PublicUser::from(&user);
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("otpCode").is_none());
        assert_eq!(json["isEmailVerified"], serde_json::json!(false));
    }

    #[test]
    fn role_parses_from_text() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
