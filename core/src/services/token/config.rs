//! Configuration for the token codec

use chrono::Duration;
use ks_shared::config::JwtConfig;

/// Signing secret and token lifetimes
#[derive(Clone)]
pub struct TokenCodecConfig {
    /// HMAC secret shared by signer and verifier
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenCodecConfig {
    pub fn new(secret: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_jwt_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.clone(), config.access_ttl(), config.refresh_ttl())
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for TokenCodecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodecConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}
