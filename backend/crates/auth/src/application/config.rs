//! Application Configuration
//!
//! Configuration for the Auth application layer. The signing secret is
//! injected here once at startup; verification code receives it through
//! this struct and never touches the process environment.

use chrono::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access-token signing secret; `None` is a deployment defect that
    /// surfaces as a server error, distinct from any client failure
    pub token_secret: Option<Vec<u8>>,
    /// Access-token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Reset-token lifetime (1 hour)
    pub reset_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl: Duration::hours(24),
            reset_token_ttl: Duration::hours(1),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn with_secret(secret: Vec<u8>) -> Self {
        Self {
            token_secret: Some(secret),
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development)
    pub fn development() -> Self {
        Self::with_secret(platform::crypto::random_bytes(32))
    }

    /// Get the signing secret as a slice
    pub fn token_secret(&self) -> Option<&[u8]> {
        self.token_secret.as_deref()
    }

    /// Get the password pepper as a slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_secret() {
        assert!(AuthConfig::default().token_secret().is_none());
    }

    #[test]
    fn test_development_generates_secret() {
        let config = AuthConfig::development();
        assert_eq!(config.token_secret().unwrap().len(), 32);
    }
}
