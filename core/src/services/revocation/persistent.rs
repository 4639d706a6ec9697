//! Durable blacklist backed by a [`RevocationRepository`]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::revocation::{ClientMetadata, RevocationRecord};
use crate::domain::entities::user::UserId;
use crate::errors::DomainResult;
use crate::repositories::RevocationRepository;

use super::memory::MemoryRevocationStore;
use super::store::{RevocationStore, RevocationStrategy};

/// Lowercase hex SHA-256 of a raw token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Blacklist keyed by token hash; raw tokens are never stored
///
/// Refresh tokens are recorded at issue time, so revoking one flips
/// `revoked_at` on its record. Tokens with no record (access tokens) are
/// held by hash in an in-process layer until they expire.
pub struct PersistentRevocationStore {
    repository: Arc<dyn RevocationRepository>,
    unrecorded: MemoryRevocationStore,
}

impl PersistentRevocationStore {
    pub fn new(repository: Arc<dyn RevocationRepository>) -> Self {
        Self {
            repository,
            unrecorded: MemoryRevocationStore::new(),
        }
    }
}

#[async_trait]
impl RevocationStore for PersistentRevocationStore {
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> DomainResult<()> {
        let token_hash = hash_token(token);

        if self.repository.revoke_by_hash(&token_hash).await? {
            return Ok(());
        }

        // Either already revoked or never recorded.
        if self.repository.get_by_hash(&token_hash).await?.is_none() {
            self.unrecorded.add(&token_hash, expires_at).await?;
        }
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> DomainResult<bool> {
        let token_hash = hash_token(token);

        if self.unrecorded.is_revoked(&token_hash).await? {
            return Ok(true);
        }

        Ok(self
            .repository
            .get_by_hash(&token_hash)
            .await?
            .map(|record| record.is_revoked())
            .unwrap_or(false))
    }

    async fn sweep_expired(&self) -> DomainResult<usize> {
        let now = Utc::now();
        let in_memory = self.unrecorded.sweep_expired_at(now).await;
        let stored = self.repository.delete_expired(now).await?;
        Ok(in_memory + stored)
    }

    async fn record_refresh_token(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
        client: &ClientMetadata,
    ) -> DomainResult<()> {
        let record = RevocationRecord::new(user_id, hash_token(token), expires_at, client.clone());
        self.repository.create(record).await?;
        debug!(user_id, "Recorded refresh token");
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: UserId) -> DomainResult<usize> {
        let revoked = self.repository.revoke_all_by_user_id(user_id).await?;
        info!(user_id, revoked, "Revoked all refresh tokens for user");
        Ok(revoked)
    }

    fn strategy(&self) -> RevocationStrategy {
        RevocationStrategy::Persistent
    }
}
