//! In-process blacklist

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::errors::DomainResult;

use super::store::{RevocationStore, RevocationStrategy};

/// Blacklist held in a map from token to its expiry
///
/// Contents are lost on restart: every token revoked here becomes valid
/// again until its own `exp` once the process is restarted.
#[derive(Debug, Default)]
pub struct MemoryRevocationStore {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry that expired before `now`
    pub async fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at >= now);
        before - entries.len()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> DomainResult<()> {
        self.entries
            .write()
            .await
            .insert(token.to_string(), expires_at);
        Ok(())
    }

    // Expiry is not consulted here; an expired token fails verification anyway.
    async fn is_revoked(&self, token: &str) -> DomainResult<bool> {
        Ok(self.entries.read().await.contains_key(token))
    }

    async fn sweep_expired(&self) -> DomainResult<usize> {
        Ok(self.sweep_expired_at(Utc::now()).await)
    }

    fn strategy(&self) -> RevocationStrategy {
        RevocationStrategy::Memory
    }
}
