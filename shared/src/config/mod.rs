//! Configuration module
//!
//! - `auth` - token signing secret and lifetimes
//! - `revocation` - blacklist backend selection and sweep schedule
//! - `database` - connection pool settings for the persistent backend
//! - `environment` - environment detection and logging configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod revocation;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, INSECURE_SECRETS, MAX_TOKEN_TTL_SECONDS};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use revocation::{RevocationBackend, RevocationConfig};

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT secret is not set")]
    MissingSecret,

    #[error("JWT secret is set to a known insecure default")]
    InsecureSecret,

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub revocation: RevocationConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let config = Self {
            environment,
            auth: AuthConfig::from_env()?,
            revocation: RevocationConfig::from_env()?,
            database: DatabaseConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML/YAML/JSON file, overridden by `KEYSTONE__SECTION__KEY` variables
    ///
    /// A missing file is not an error; the environment alone may carry
    /// the whole configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("KEYSTONE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.validate()?;
        self.revocation.validate()?;
        Ok(())
    }
}
