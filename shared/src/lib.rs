//! Shared configuration and utilities for Keystone
//!
//! - Configuration types (JWT, revocation backend, database, environment)
//! - Tracing subscriber bootstrap
//! - Transport-neutral error response

pub mod config;
pub mod errors;
pub mod logging;

pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, RevocationBackend, RevocationConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use logging::init_tracing;
