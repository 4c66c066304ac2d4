use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::config::MailConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Verification,
    PasswordReset,
}

impl OtpPurpose {
    fn subject(self) -> &'static str {
        match self {
            OtpPurpose::Verification => "Verify your ReWear email",
            OtpPurpose::PasswordReset => "Reset your ReWear password",
        }
    }
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("mail provider returned status {0}")]
    Provider(reqwest::StatusCode),
}

/// Outbound transactional mail. One implementation talks to an HTTP mail
/// provider; the development implementation logs instead of delivering.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp(
        &self,
        to: &str,
        name: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), MailerError>;

    async fn send_welcome(&self, to: &str, name: &str) -> Result<(), MailerError>;
}

/// Delivers through a JSON-over-HTTP transactional mail endpoint.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from_address: String,
}

impl HttpMailer {
    pub fn new(endpoint: String, api_key: Option<String>, from_address: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            from_address,
        }
    }

    async fn deliver(&self, to: &str, subject: &str, body: String) -> Result<(), MailerError> {
        let payload = json!({
            "from": self.from_address,
            "to": to,
            "subject": subject,
            "text": body,
        });

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(MailerError::Provider(response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_otp(
        &self,
        to: &str,
        name: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), MailerError> {
        let body = format!(
            "Hi {},\n\nYour one-time code is {}. It expires in 10 minutes.\n\nThe ReWear Team",
            name, code
        );
        self.deliver(to, purpose.subject(), body).await
    }

    async fn send_welcome(&self, to: &str, name: &str) -> Result<(), MailerError> {
        let body = format!(
            "Hi {},\n\nYour email is verified and your ReWear account is ready.\n\nThe ReWear Team",
            name
        );
        self.deliver(to, "Welcome to ReWear", body).await
    }
}

/// Logs mail instead of sending it. Default when no provider is configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp(
        &self,
        to: &str,
        _name: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), MailerError> {
        info!(email = to, code, subject = purpose.subject(), "otp mail (not delivered)");
        Ok(())
    }

    async fn send_welcome(&self, to: &str, _name: &str) -> Result<(), MailerError> {
        info!(email = to, "welcome mail (not delivered)");
        Ok(())
    }
}

/// Select the mailer implementation at process start.
pub fn from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    match &config.provider_url {
        Some(url) => Arc::new(HttpMailer::new(
            url.clone(),
            config.provider_api_key.clone(),
            config.from_address.clone(),
        )),
        None => Arc::new(LogMailer),
    }
}
