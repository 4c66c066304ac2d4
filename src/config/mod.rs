use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub filter: FilterConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub rewards: RewardsConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub max_limit: Option<i32>,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cors_origins: Vec<String>,
    pub otp_ttl_minutes: i64,
    pub otp_max_attempts: i32,
    pub otp_resend_cooldown_secs: i64,
    pub min_password_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    pub coupon_validity_days: i64,
    pub ledger_page_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Transactional mail HTTP endpoint. When unset, mail is logged instead
    /// of delivered (development behavior).
    pub provider_url: Option<String>,
    pub provider_api_key: Option<String>,
    pub from_address: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Filter overrides
        if let Ok(v) = env::var("FILTER_MAX_LIMIT") {
            self.filter.max_limit = v.parse().ok();
        }
        if let Ok(v) = env::var("FILTER_DEBUG_LOGGING") {
            self.filter.debug_logging = v.parse().unwrap_or(self.filter.debug_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("OTP_TTL_MINUTES") {
            self.security.otp_ttl_minutes = v.parse().unwrap_or(self.security.otp_ttl_minutes);
        }
        if let Ok(v) = env::var("OTP_MAX_ATTEMPTS") {
            self.security.otp_max_attempts = v.parse().unwrap_or(self.security.otp_max_attempts);
        }
        if let Ok(v) = env::var("OTP_RESEND_COOLDOWN_SECS") {
            self.security.otp_resend_cooldown_secs =
                v.parse().unwrap_or(self.security.otp_resend_cooldown_secs);
        }

        // Rewards overrides
        if let Ok(v) = env::var("COUPON_VALIDITY_DAYS") {
            self.rewards.coupon_validity_days =
                v.parse().unwrap_or(self.rewards.coupon_validity_days);
        }

        // Mail overrides
        if let Ok(v) = env::var("MAIL_PROVIDER_URL") {
            self.mail.provider_url = Some(v);
        }
        if let Ok(v) = env::var("MAIL_PROVIDER_API_KEY") {
            self.mail.provider_api_key = Some(v);
        }
        if let Ok(v) = env::var("MAIL_FROM_ADDRESS") {
            self.mail.from_address = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            filter: FilterConfig {
                max_limit: Some(100),
                debug_logging: true,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: "rewear-dev-secret".to_string(),
                jwt_expiry_hours: 24 * 7,
                cors_origins: vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:5174".to_string(),
                ],
                otp_ttl_minutes: 10,
                otp_max_attempts: 5,
                otp_resend_cooldown_secs: 60,
                min_password_length: 8,
            },
            rewards: RewardsConfig {
                coupon_validity_days: 30,
                ledger_page_size: 20,
            },
            mail: MailConfig {
                provider_url: None,
                provider_api_key: None,
                from_address: "no-reply@rewear.local".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            filter: FilterConfig {
                max_limit: Some(50),
                debug_logging: false,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout_secs: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7,
                cors_origins: vec!["https://staging.rewear.example.com".to_string()],
                otp_ttl_minutes: 10,
                otp_max_attempts: 5,
                otp_resend_cooldown_secs: 60,
                min_password_length: 8,
            },
            rewards: RewardsConfig {
                coupon_validity_days: 30,
                ledger_page_size: 20,
            },
            mail: MailConfig {
                provider_url: None,
                provider_api_key: None,
                from_address: "no-reply@staging.rewear.example.com".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            filter: FilterConfig {
                max_limit: Some(50),
                debug_logging: false,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7,
                cors_origins: vec!["https://rewear.example.com".to_string()],
                otp_ttl_minutes: 10,
                otp_max_attempts: 5,
                otp_resend_cooldown_secs: 60,
                min_password_length: 8,
            },
            rewards: RewardsConfig {
                coupon_validity_days: 30,
                ledger_page_size: 20,
            },
            mail: MailConfig {
                provider_url: None,
                provider_api_key: None,
                from_address: "no-reply@rewear.example.com".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.filter.max_limit, Some(100));
        assert_eq!(config.security.otp_max_attempts, 5);
        assert_eq!(config.security.jwt_expiry_hours, 24 * 7);
        assert!(!config.security.jwt_secret.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.filter.max_limit, Some(50));
        // Tokens cannot be signed until JWT_SECRET is provided
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.security.otp_resend_cooldown_secs, 60);
    }
}
