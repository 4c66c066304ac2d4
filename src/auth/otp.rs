use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config;

/// Generate a 6-digit one-time code.
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

/// Expiry timestamp for a code generated now.
pub fn otp_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(config::config().security.otp_ttl_minutes)
}

/// Whether a stored code matches the submitted one and is still live.
pub fn otp_is_valid(
    stored: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    submitted: &str,
    now: DateTime<Utc>,
) -> bool {
    match (stored, expires_at) {
        (Some(code), Some(expiry)) => code == submitted && expiry > now,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..32 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn expired_code_is_invalid() {
        let now = Utc::now();
        let past = now - Duration::minutes(1);
        assert!(!otp_is_valid(Some("123456"), Some(past), "123456", now));
    }

    #[test]
    fn wrong_code_is_invalid() {
        let now = Utc::now();
        let future = now + Duration::minutes(5);
        assert!(!otp_is_valid(Some("123456"), Some(future), "654321", now));
        assert!(otp_is_valid(Some("123456"), Some(future), "123456", now));
    }

    #[test]
    fn missing_code_is_invalid() {
        let now = Utc::now();
        assert!(!otp_is_valid(None, None, "123456", now));
    }
}
