//! Authentication and token signing configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Placeholder secret used by [`JwtConfig::default`]. Never valid for signing.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Secrets that ship in sample configs and must be rejected at startup.
pub const INSECURE_SECRETS: &[&str] = &[
    DEFAULT_JWT_SECRET,
    "your-super-secret-key-change-in-production",
    "development-secret-please-change-in-production",
    "secret",
    "changeme",
];

/// Longest token lifetime accepted anywhere (ten years, in seconds)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 10 * 365 * 86400;

/// Default upper bound on a single port call, in milliseconds
pub const DEFAULT_PORT_TIMEOUT_MS: u64 = 5000;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    ///
    /// Saturates on overflow; [`validate`](Self::validate) rejects the result.
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in days
    ///
    /// Saturates on overflow; [`validate`](Self::validate) rejects the result.
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days.saturating_mul(86400);
        self
    }

    /// Check if the secret is one of the known insecure values
    pub fn is_using_insecure_secret(&self) -> bool {
        is_insecure_secret(&self.secret)
    }

    /// Access token lifetime as a chrono duration
    pub fn access_ttl(&self) -> chrono::Duration {
        seconds_to_duration(self.access_token_expiry)
    }

    /// Refresh token lifetime as a chrono duration
    pub fn refresh_ttl(&self) -> chrono::Duration {
        seconds_to_duration(self.refresh_token_expiry)
    }

    /// Reject missing or insecure secrets and nonsensical lifetimes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.is_using_insecure_secret() {
            return Err(ConfigError::InsecureSecret);
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "access_token_expiry".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.refresh_token_expiry < self.access_token_expiry {
            return Err(ConfigError::InvalidValue {
                key: "refresh_token_expiry".to_string(),
                message: "must not be shorter than the access token expiry".to_string(),
            });
        }
        // refresh >= access, so this bounds both
        if self.refresh_token_expiry > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::InvalidValue {
                key: "refresh_token_expiry".to_string(),
                message: format!("must not exceed {} seconds", MAX_TOKEN_TTL_SECONDS),
            });
        }
        Ok(())
    }
}

fn seconds_to_duration(secs: i64) -> chrono::Duration {
    chrono::Duration::try_seconds(secs).unwrap_or(if secs < 0 {
        chrono::Duration::MIN
    } else {
        chrono::Duration::MAX
    })
}

/// Returns true when `secret` matches a published placeholder
pub fn is_insecure_secret(secret: &str) -> bool {
    INSECURE_SECRETS.iter().any(|s| *s == secret)
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Upper bound on each user directory, password or revocation call
    #[serde(default = "default_port_timeout_ms")]
    pub port_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            port_timeout_ms: DEFAULT_PORT_TIMEOUT_MS,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// `JWT_SECRET` is required; lifetimes come from
    /// `JWT_ACCESS_TOKEN_TTL_MIN` (default 15) and
    /// `JWT_REFRESH_TOKEN_TTL_DAYS` (default 7), the port timeout from
    /// `AUTH_PORT_TIMEOUT_MS` (default 5000).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::MissingSecret)?;
        let access_minutes: i64 = parse_or(&lookup, "JWT_ACCESS_TOKEN_TTL_MIN", 15)?;
        let refresh_days: i64 = parse_or(&lookup, "JWT_REFRESH_TOKEN_TTL_DAYS", 7)?;
        let port_timeout_ms = parse_or(&lookup, "AUTH_PORT_TIMEOUT_MS", DEFAULT_PORT_TIMEOUT_MS)?;

        let jwt = JwtConfig {
            secret,
            access_token_expiry: scale("JWT_ACCESS_TOKEN_TTL_MIN", access_minutes, 60)?,
            refresh_token_expiry: scale("JWT_REFRESH_TOKEN_TTL_DAYS", refresh_days, 86400)?,
        };

        let config = Self {
            jwt,
            port_timeout_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }

    pub fn port_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.port_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        if self.port_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "port_timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_port_timeout_ms() -> u64 {
    DEFAULT_PORT_TIMEOUT_MS
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected an integer, got {:?}", raw),
        }),
        None => Ok(default),
    }
}

fn scale(key: &str, value: i64, factor: i64) -> Result<i64, ConfigError> {
    value.checked_mul(factor).ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{} is too large", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert!(config.is_using_insecure_secret());
        assert!(matches!(config.validate(), Err(ConfigError::InsecureSecret)));
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("a-long-and-random-signing-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert_eq!(config.access_ttl(), chrono::Duration::minutes(30));
        assert!(!config.is_using_insecure_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = JwtConfig::new("   ");
        assert!(matches!(config.validate(), Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn test_every_known_placeholder_rejected() {
        for secret in INSECURE_SECRETS {
            assert!(matches!(
                JwtConfig::new(*secret).validate(),
                Err(ConfigError::InsecureSecret)
            ));
        }
    }

    #[test]
    fn test_lifetime_above_maximum_rejected() {
        let mut config = JwtConfig::new("a-long-and-random-signing-secret");
        config.refresh_token_expiry = 1_000_000_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "refresh_token_expiry"
        ));

        config.refresh_token_expiry = MAX_TOKEN_TTL_SECONDS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_saturates_huge_values() {
        let config = JwtConfig::new("a-long-and-random-signing-secret")
            .with_refresh_expiry_days(i64::MAX / 1000);

        assert_eq!(config.refresh_token_expiry, i64::MAX);
        assert_eq!(config.refresh_ttl(), chrono::Duration::MAX);
        assert!(config.validate().is_err());
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: std::collections::HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config =
            AuthConfig::from_lookup(lookup_from(&[("JWT_SECRET", "lookup-test-secret-91c2")]))
                .unwrap();

        assert_eq!(config.jwt.access_token_expiry, 900);
        assert_eq!(config.jwt.refresh_token_expiry, 604800);
        assert_eq!(config.port_timeout(), std::time::Duration::from_millis(5000));
    }

    #[test]
    fn test_from_lookup_rejects_overflowing_lifetime() {
        let huge = (i64::MAX / 1000).to_string();
        let result = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "lookup-test-secret-91c2"),
            ("JWT_REFRESH_TOKEN_TTL_DAYS", huge.as_str()),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "JWT_REFRESH_TOKEN_TTL_DAYS"
        ));
    }

    #[test]
    fn test_from_lookup_rejects_lifetime_above_maximum() {
        let result = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "lookup-test-secret-91c2"),
            ("JWT_REFRESH_TOKEN_TTL_DAYS", "100000"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_lookup_port_timeout() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "lookup-test-secret-91c2"),
            ("AUTH_PORT_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.port_timeout(), std::time::Duration::from_millis(250));

        let zero = AuthConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "lookup-test-secret-91c2"),
            ("AUTH_PORT_TIMEOUT_MS", "0"),
        ]));
        assert!(matches!(zero, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_refresh_shorter_than_access_rejected() {
        let mut config = JwtConfig::new("a-long-and-random-signing-secret");
        config.refresh_token_expiry = 60;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
