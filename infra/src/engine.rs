//! Engine wiring
//!
//! Builds the token codec, the configured revocation strategy, its sweeper
//! and the authentication service from an [`AppConfig`].

use std::sync::Arc;

use ks_core::repositories::{RevocationRepository, UserDirectory};
use ks_core::services::{
    AuthServiceConfig, AuthenticationService, JwtTokenCodec, MemoryRevocationStore,
    PasswordVerifier, PersistentRevocationStore, RevocationStore, RevocationStrategy,
    RevocationSweeper, SweepConfig, SweepHandle, TokenCodecConfig,
};
use ks_shared::config::{AppConfig, ConfigError, RevocationBackend};

use crate::InfrastructureError;

#[cfg(feature = "mysql")]
use crate::database::{DatabasePool, MySqlRevocationRepository, MySqlUserDirectory};
#[cfg(feature = "mysql")]
use crate::password::BcryptPasswordVerifier;

/// Collaborators the engine is wired around
pub struct EnginePorts {
    pub users: Arc<dyn UserDirectory>,
    pub passwords: Arc<dyn PasswordVerifier>,
    /// Required by the persistent backend, ignored by the memory backend
    pub revocation_repository: Option<Arc<dyn RevocationRepository>>,
}

/// A running authentication engine
///
/// Owns the sweeper task; call [`shutdown`](Self::shutdown) to stop it.
pub struct AuthEngine {
    service: Arc<AuthenticationService>,
    store: Arc<dyn RevocationStore>,
    sweeper: SweepHandle,
    #[cfg(feature = "mysql")]
    pool: Option<DatabasePool>,
}

impl AuthEngine {
    /// Wire the engine around caller-supplied ports
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - Invalid configuration, or the
    ///   persistent backend was selected without a repository
    /// * `Err(InfrastructureError::Domain)` - The token codec rejected its settings
    pub fn from_ports(config: &AppConfig, ports: EnginePorts) -> Result<Self, InfrastructureError> {
        config.validate()?;

        let codec = JwtTokenCodec::new(TokenCodecConfig::from_jwt_config(&config.auth.jwt))?;
        let store = build_store(config.revocation.backend, ports.revocation_repository)?;

        let sweeper = RevocationSweeper::spawn(
            store.clone(),
            SweepConfig::from_revocation_config(&config.revocation),
        );

        let service = AuthenticationService::new(
            ports.users,
            ports.passwords,
            Arc::new(codec),
            store.clone(),
            AuthServiceConfig::from_auth_config(&config.auth),
        );

        tracing::info!(
            environment = %config.environment,
            strategy = %store.strategy(),
            "Authentication engine ready"
        );

        Ok(Self {
            service: Arc::new(service),
            store,
            sweeper,
            #[cfg(feature = "mysql")]
            pool: None,
        })
    }

    /// Connect to MySQL and wire the MySQL adapters with bcrypt passwords
    #[cfg(feature = "mysql")]
    pub async fn connect(config: &AppConfig) -> Result<Self, InfrastructureError> {
        config.validate()?;

        let pool = DatabasePool::new(config.database.clone()).await?;

        let revocation_repository: Option<Arc<dyn RevocationRepository>> =
            match config.revocation.backend {
                RevocationBackend::Persistent => Some(Arc::new(MySqlRevocationRepository::new(
                    pool.get_pool().clone(),
                ))),
                RevocationBackend::Memory => None,
            };

        let ports = EnginePorts {
            users: Arc::new(MySqlUserDirectory::new(pool.get_pool().clone())),
            passwords: Arc::new(BcryptPasswordVerifier::new()),
            revocation_repository,
        };

        let mut engine = Self::from_ports(config, ports)?;
        engine.pool = Some(pool);
        Ok(engine)
    }

    pub fn service(&self) -> Arc<AuthenticationService> {
        self.service.clone()
    }

    pub fn revocation_store(&self) -> Arc<dyn RevocationStore> {
        self.store.clone()
    }

    pub fn strategy(&self) -> RevocationStrategy {
        self.store.strategy()
    }

    /// Stop the sweeper and close the database pool, if any
    pub async fn shutdown(self) {
        self.sweeper.shutdown().await;

        #[cfg(feature = "mysql")]
        if let Some(pool) = self.pool {
            pool.close().await;
        }

        tracing::info!("Authentication engine stopped");
    }
}

fn build_store(
    backend: RevocationBackend,
    repository: Option<Arc<dyn RevocationRepository>>,
) -> Result<Arc<dyn RevocationStore>, InfrastructureError> {
    match backend {
        RevocationBackend::Memory => Ok(Arc::new(MemoryRevocationStore::new())),
        RevocationBackend::Persistent => {
            let repository = repository.ok_or_else(|| {
                InfrastructureError::Config(ConfigError::InvalidValue {
                    key: "revocation.backend".to_string(),
                    message: "persistent backend needs a revocation repository".to_string(),
                })
            })?;
            Ok(Arc::new(PersistentRevocationStore::new(repository)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ks_core::domain::entities::user::User;
    use ks_core::errors::{DomainError, TokenError};
    use ks_core::repositories::{InMemoryRevocationRepository, InMemoryUserDirectory};
    use ks_shared::config::JwtConfig;

    use crate::password::BcryptPasswordVerifier;

    fn test_config(backend: RevocationBackend) -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt = JwtConfig::new("engine-test-secret-5b7c2e1a");
        config.revocation.backend = backend;
        config
    }

    async fn test_ports(with_repository: bool) -> EnginePorts {
        let passwords = BcryptPasswordVerifier::with_cost(4);
        let hash = passwords.hash("hunter2").await.unwrap();

        EnginePorts {
            users: Arc::new(InMemoryUserDirectory::with_users([User::new(
                10,
                "carol",
                "carol@example.com",
                hash,
            )])),
            passwords: Arc::new(passwords),
            revocation_repository: with_repository
                .then(|| Arc::new(InMemoryRevocationRepository::new()) as Arc<dyn RevocationRepository>),
        }
    }

    #[tokio::test]
    async fn test_memory_engine_login_and_logout() {
        let engine = AuthEngine::from_ports(&test_config(RevocationBackend::Memory), test_ports(false).await)
            .unwrap();
        assert_eq!(engine.strategy(), RevocationStrategy::Memory);

        let service = engine.service();
        let login = service.login("carol", "hunter2").await.unwrap();
        service.logout(10, &login.access_token).await.unwrap();

        assert!(matches!(
            service.validate_token(&login.access_token).await,
            Err(DomainError::Token(TokenError::TokenBlacklisted))
        ));

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_persistent_engine_logout_all_devices() {
        let engine = AuthEngine::from_ports(
            &test_config(RevocationBackend::Persistent),
            test_ports(true).await,
        )
        .unwrap();
        assert_eq!(engine.strategy(), RevocationStrategy::Persistent);

        let service = engine.service();
        let login = service.login("carol@example.com", "hunter2").await.unwrap();
        assert_eq!(service.logout_all_devices(10).await.unwrap(), 1);
        assert!(service.refresh_token(&login.refresh_token).await.is_err());

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_persistent_engine_requires_repository() {
        let result = AuthEngine::from_ports(
            &test_config(RevocationBackend::Persistent),
            test_ports(false).await,
        );
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[tokio::test]
    async fn test_configured_port_timeout_reaches_service() {
        let mut config = test_config(RevocationBackend::Memory);
        config.auth.port_timeout_ms = 250;

        let engine = AuthEngine::from_ports(&config, test_ports(false).await).unwrap();
        assert_eq!(
            engine.service().config().port_timeout,
            std::time::Duration::from_millis(250)
        );

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_unrepresentable_lifetime_rejected_before_login() {
        let mut config = test_config(RevocationBackend::Memory);
        config.auth.jwt.refresh_token_expiry = 1_000_000_000_000_000;

        let result = AuthEngine::from_ports(&config, test_ports(false).await);
        assert!(matches!(
            result,
            Err(InfrastructureError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[tokio::test]
    async fn test_insecure_secret_rejected() {
        let mut config = test_config(RevocationBackend::Memory);
        config.auth.jwt.secret = "your-super-secret-key-change-in-production".to_string();

        let result = AuthEngine::from_ports(&config, test_ports(false).await);
        assert!(matches!(
            result,
            Err(InfrastructureError::Config(ConfigError::InsecureSecret))
        ));
    }
}
