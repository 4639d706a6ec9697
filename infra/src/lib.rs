//! # Infrastructure Layer
//!
//! Concrete adapters for the Keystone token engine:
//! - **Database**: MySQL `RevocationRepository` and `UserDirectory` using SQLx
//! - **Password**: bcrypt `PasswordVerifier`
//! - **Engine**: wiring of codec, revocation strategy, sweeper and service
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use ks_core::errors::DomainError;
use ks_shared::config::ConfigError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

pub mod engine;
pub mod password;

pub use engine::{AuthEngine, EnginePorts};
pub use password::BcryptPasswordVerifier;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlRevocationRepository, MySqlUserDirectory};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Engine component rejected its settings
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Domain(e) => e,
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
