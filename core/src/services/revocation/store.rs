//! Revocation store capability shared by both blacklist strategies

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ks_shared::config::RevocationBackend;

use crate::domain::entities::revocation::ClientMetadata;
use crate::domain::entities::user::UserId;
use crate::errors::{DomainError, DomainResult};

/// Which blacklist strategy a store implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationStrategy {
    Memory,
    Persistent,
}

impl RevocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevocationStrategy::Memory => "memory",
            RevocationStrategy::Persistent => "persistent",
        }
    }
}

impl std::fmt::Display for RevocationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RevocationBackend> for RevocationStrategy {
    fn from(backend: RevocationBackend) -> Self {
        match backend {
            RevocationBackend::Memory => RevocationStrategy::Memory,
            RevocationBackend::Persistent => RevocationStrategy::Persistent,
        }
    }
}

/// Blacklist of tokens that must be rejected before their natural expiry
///
/// Stores are shared as `Arc<dyn RevocationStore>` between the
/// authentication service and the sweeper, so every method takes `&self`.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Mark `token` as revoked until `expires_at`. Adding twice is a no-op.
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> DomainResult<()>;

    /// Whether `token` has been revoked
    ///
    /// # Returns
    /// * `Ok(bool)` - Revocation status
    /// * `Err(DomainError)` - The backing store could not be read
    async fn is_revoked(&self, token: &str) -> DomainResult<bool>;

    /// Remove entries whose expiry has passed
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn sweep_expired(&self) -> DomainResult<usize>;

    /// Track a freshly issued refresh token so it can be revoked later
    ///
    /// Stores that cannot enumerate tokens ignore this.
    async fn record_refresh_token(
        &self,
        _user_id: UserId,
        _token: &str,
        _expires_at: DateTime<Utc>,
        _client: &ClientMetadata,
    ) -> DomainResult<()> {
        Ok(())
    }

    /// Revoke every tracked refresh token of `user_id`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens revoked
    /// * `Err(DomainError::Unsupported)` - The strategy does not track tokens per user
    async fn revoke_all_for_user(&self, _user_id: UserId) -> DomainResult<usize> {
        Err(DomainError::Unsupported {
            operation: format!("revoke_all_for_user with {} revocation", self.strategy()),
        })
    }

    fn strategy(&self) -> RevocationStrategy;
}
