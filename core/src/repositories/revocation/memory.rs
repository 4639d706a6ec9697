//! In-memory implementation of RevocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::revocation::RevocationRecord;
use crate::domain::entities::user::UserId;
use crate::errors::DomainError;

use super::r#trait::RevocationRepository;

/// Revocation repository holding records in a map keyed by token hash
///
/// Used in tests and local development. Cloning shares the same records.
#[derive(Clone, Default)]
pub struct InMemoryRevocationRepository {
    records: Arc<RwLock<HashMap<String, RevocationRecord>>>,
}

impl InMemoryRevocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, revoked or not
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn create(&self, record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.token_hash) {
            return Err(DomainError::Validation {
                message: "Revocation record already exists".to_string(),
            });
        }

        records.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn get_by_hash(&self, token_hash: &str) -> Result<Option<RevocationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(token_hash).cloned())
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records
            .get_mut(token_hash)
            .map(|record| record.revoke(Utc::now()))
            .unwrap_or(false))
    }

    async fn revoke_all_by_user_id(&self, user_id: UserId) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let now = Utc::now();

        let mut revoked = 0;
        for record in records.values_mut().filter(|r| r.user_id == user_id) {
            if record.revoke(now) {
                revoked += 1;
            }
        }

        Ok(revoked)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|_, record| !record.is_expired_at(now));

        Ok(before - records.len())
    }
}
