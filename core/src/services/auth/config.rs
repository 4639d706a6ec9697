//! Configuration for the authentication service

use std::time::Duration;

use ks_shared::config::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Upper bound on every directory, verifier and revocation call
    pub port_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            port_timeout: Duration::from_secs(5),
        }
    }
}

impl AuthServiceConfig {
    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self {
            port_timeout: config.port_timeout(),
        }
    }

    pub fn with_port_timeout(mut self, timeout: Duration) -> Self {
        self.port_timeout = timeout;
        self
    }
}
