//! Tests for the repository-backed blacklist

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::revocation::{ClientMetadata, RevocationRecord};
use crate::domain::entities::user::UserId;
use crate::errors::DomainError;
use crate::repositories::{InMemoryRevocationRepository, RevocationRepository};
use crate::services::revocation::{
    hash_token, PersistentRevocationStore, RevocationStore, RevocationStrategy,
};

fn create_test_store() -> (PersistentRevocationStore, InMemoryRevocationRepository) {
    let repository = InMemoryRevocationRepository::new();
    let store = PersistentRevocationStore::new(Arc::new(repository.clone()));
    (store, repository)
}

/// Repository whose every call fails
struct UnavailableRepository;

#[async_trait]
impl RevocationRepository for UnavailableRepository {
    async fn create(&self, _record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        Err(DomainError::internal("database unavailable"))
    }

    async fn get_by_hash(&self, _token_hash: &str) -> Result<Option<RevocationRecord>, DomainError> {
        Err(DomainError::internal("database unavailable"))
    }

    async fn revoke_by_hash(&self, _token_hash: &str) -> Result<bool, DomainError> {
        Err(DomainError::internal("database unavailable"))
    }

    async fn revoke_all_by_user_id(&self, _user_id: UserId) -> Result<usize, DomainError> {
        Err(DomainError::internal("database unavailable"))
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Err(DomainError::internal("database unavailable"))
    }
}

#[test]
fn test_hash_token_is_lowercase_sha256_hex() {
    assert_eq!(
        hash_token("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(hash_token("abc").len(), 64);
}

#[tokio::test]
async fn test_recorded_refresh_token_revocation() {
    let (store, repository) = create_test_store();
    let exp = Utc::now() + Duration::days(7);

    store
        .record_refresh_token(1, "refresh-1", exp, &ClientMetadata::default())
        .await
        .unwrap();
    assert!(!store.is_revoked("refresh-1").await.unwrap());

    store.add("refresh-1", exp).await.unwrap();
    store.add("refresh-1", exp).await.unwrap();

    assert!(store.is_revoked("refresh-1").await.unwrap());
    let record = repository.get_by_hash(&hash_token("refresh-1")).await.unwrap().unwrap();
    assert!(record.is_revoked());
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_raw_token_never_stored() {
    let (store, repository) = create_test_store();
    let client = ClientMetadata::new(Some("curl/8.0".to_string()), Some("10.1.2.3".to_string()));

    store
        .record_refresh_token(3, "raw-secret-token", Utc::now() + Duration::days(1), &client)
        .await
        .unwrap();

    assert!(repository.get_by_hash("raw-secret-token").await.unwrap().is_none());
    let record = repository.get_by_hash(&hash_token("raw-secret-token")).await.unwrap().unwrap();
    assert_eq!(record.user_id, 3);
    assert_eq!(record.client, client);
}

#[tokio::test]
async fn test_unrecorded_token_revoked_in_process() {
    let (store, repository) = create_test_store();

    store.add("access-1", Utc::now() + Duration::minutes(15)).await.unwrap();

    assert!(store.is_revoked("access-1").await.unwrap());
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_unknown_token_not_revoked() {
    let (store, _) = create_test_store();
    assert!(!store.is_revoked("never-seen").await.unwrap());
}

#[tokio::test]
async fn test_revoke_all_for_user() {
    let (store, _) = create_test_store();
    let exp = Utc::now() + Duration::days(7);
    let client = ClientMetadata::default();

    store.record_refresh_token(1, "r-a", exp, &client).await.unwrap();
    store.record_refresh_token(1, "r-b", exp, &client).await.unwrap();
    store.record_refresh_token(2, "r-c", exp, &client).await.unwrap();
    store.add("r-a", exp).await.unwrap();

    assert_eq!(store.revoke_all_for_user(1).await.unwrap(), 1);
    assert!(store.is_revoked("r-a").await.unwrap());
    assert!(store.is_revoked("r-b").await.unwrap());
    assert!(!store.is_revoked("r-c").await.unwrap());
}

#[tokio::test]
async fn test_sweep_removes_expired_records_and_entries() {
    let (store, repository) = create_test_store();
    let client = ClientMetadata::default();
    let past = Utc::now() - Duration::minutes(1);
    let future = Utc::now() + Duration::days(1);

    store.record_refresh_token(1, "old", past, &client).await.unwrap();
    store.record_refresh_token(1, "new", future, &client).await.unwrap();
    store.add("old-access", past).await.unwrap();
    store.add("new-access", future).await.unwrap();

    assert_eq!(store.sweep_expired().await.unwrap(), 2);
    assert_eq!(repository.len().await, 1);
    assert!(!store.is_revoked("old-access").await.unwrap());
    assert!(store.is_revoked("new-access").await.unwrap());
}

#[tokio::test]
async fn test_repository_failure_surfaces() {
    let store = PersistentRevocationStore::new(Arc::new(UnavailableRepository));
    assert_eq!(store.strategy(), RevocationStrategy::Persistent);

    assert!(matches!(
        store.is_revoked("token").await,
        Err(DomainError::Internal { .. })
    ));
    assert!(store.add("token", Utc::now()).await.is_err());
    assert!(store.sweep_expired().await.is_err());
}
