//! Reset Mail Delivery
//!
//! Implementations of the `ResetMailer` port. Delivery goes through an
//! HTTP mail-delivery service; a delivery failure propagates as a
//! classified error instead of being swallowed, so the caller never
//! believes a token went out when it did not.

use crate::domain::repository::ResetMailer;
use crate::error::{AuthError, AuthResult};

/// HTTP mail-delivery client
///
/// Posts `{to, token}` to the configured delivery endpoint. The
/// endpoint owns templating and transport.
#[derive(Clone)]
pub struct HttpResetMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpResetMailer {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

impl ResetMailer for HttpResetMailer {
    async fn send_password_reset(&self, recipient: &str, raw_token: &str) -> AuthResult<()> {
        let body = serde_json::json!({
            "to": recipient,
            "token": raw_token,
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::MailDelivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::MailDelivery(format!(
                "Delivery service returned status {}",
                response.status()
            )));
        }

        tracing::debug!(recipient = %recipient, "Reset mail handed to delivery service");

        Ok(())
    }
}

/// Development-only mailer that logs instead of delivering
///
/// Writes the raw token to the log, which is exactly the secret leak
/// the HTTP mailer exists to avoid. Never wire this in production.
#[derive(Clone, Default)]
pub struct LoggingResetMailer;

impl ResetMailer for LoggingResetMailer {
    async fn send_password_reset(&self, recipient: &str, raw_token: &str) -> AuthResult<()> {
        tracing::info!(
            recipient = %recipient,
            token = %raw_token,
            "Password reset token (development mailer)"
        );
        Ok(())
    }
}
