//! Tests for the background sweeper

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::revocation::ClientMetadata;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{InMemoryRevocationRepository, RevocationRepository};
use crate::services::revocation::{
    hash_token, MemoryRevocationStore, PersistentRevocationStore, RevocationStore,
    RevocationStrategy, RevocationSweeper, SweepConfig,
};

/// Store that only counts sweeps
#[derive(Default)]
struct CountingStore {
    sweeps: AtomicUsize,
    fail: bool,
}

impl CountingStore {
    fn sweeps(&self) -> usize {
        self.sweeps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RevocationStore for CountingStore {
    async fn add(&self, _token: &str, _expires_at: DateTime<Utc>) -> DomainResult<()> {
        Ok(())
    }

    async fn is_revoked(&self, _token: &str) -> DomainResult<bool> {
        Ok(false)
    }

    async fn sweep_expired(&self) -> DomainResult<usize> {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::internal("sweep failed"));
        }
        Ok(0)
    }

    fn strategy(&self) -> RevocationStrategy {
        RevocationStrategy::Memory
    }
}

#[tokio::test(start_paused = true)]
async fn test_sweeps_on_each_interval() {
    let store = Arc::new(CountingStore::default());
    let handle = RevocationSweeper::spawn(store.clone(), SweepConfig::new(Duration::from_secs(10)));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(store.sweeps(), 0);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(store.sweeps(), 3);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_sweeping() {
    let store = Arc::new(CountingStore::default());
    let handle = RevocationSweeper::spawn(store.clone(), SweepConfig::new(Duration::from_secs(10)));

    tokio::time::sleep(Duration::from_secs(15)).await;
    assert!(!handle.is_finished());

    tokio::time::timeout(Duration::from_secs(1), handle.shutdown())
        .await
        .expect("sweeper did not stop");

    let after_shutdown = store.sweeps();
    tokio::time::sleep(Duration::from_secs(100)).await;
    assert_eq!(store.sweeps(), after_shutdown);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_sweeping() {
    let store = Arc::new(CountingStore::default());
    let handle = RevocationSweeper::spawn(store.clone(), SweepConfig::new(Duration::from_secs(10)));

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(store.sweeps(), 1);

    drop(handle);
    tokio::time::sleep(Duration::from_secs(100)).await;
    assert_eq!(store.sweeps(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_sweep_keeps_loop_running() {
    let store = Arc::new(CountingStore {
        fail: true,
        ..Default::default()
    });
    let handle = RevocationSweeper::spawn(store.clone(), SweepConfig::new(Duration::from_secs(10)));

    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(store.sweeps(), 2);
    assert!(!handle.is_finished());

    handle.shutdown().await;
}

#[tokio::test]
async fn test_disabled_sweeper_never_starts() {
    let store = Arc::new(CountingStore::default());
    let config = SweepConfig {
        interval: Duration::from_secs(10),
        enabled: false,
    };

    let handle = RevocationSweeper::spawn(store.clone(), config);
    assert!(handle.is_finished());
    handle.shutdown().await;
    assert_eq!(store.sweeps(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_purges_memory_store() {
    let store = Arc::new(MemoryRevocationStore::new());
    store
        .add("stale", Utc::now() - chrono::Duration::seconds(1))
        .await
        .unwrap();
    store
        .add("live", Utc::now() + chrono::Duration::hours(1))
        .await
        .unwrap();

    let handle = RevocationSweeper::spawn(store.clone(), SweepConfig::new(Duration::from_secs(60)));
    tokio::time::sleep(Duration::from_secs(61)).await;

    assert!(!store.is_revoked("stale").await.unwrap());
    assert!(store.is_revoked("live").await.unwrap());
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_purges_persistent_store() {
    let repository = InMemoryRevocationRepository::new();
    let store = Arc::new(PersistentRevocationStore::new(Arc::new(repository.clone())));
    let client = ClientMetadata::default();

    store
        .record_refresh_token(7, "stale-refresh", Utc::now() - chrono::Duration::seconds(1), &client)
        .await
        .unwrap();
    store
        .record_refresh_token(7, "live-refresh", Utc::now() + chrono::Duration::hours(1), &client)
        .await
        .unwrap();
    store
        .add("stale-access", Utc::now() - chrono::Duration::seconds(1))
        .await
        .unwrap();
    assert_eq!(repository.len().await, 2);

    let handle = RevocationSweeper::spawn(
        store.clone(),
        SweepConfig::for_strategy(RevocationStrategy::Persistent),
    );

    tokio::time::sleep(Duration::from_secs(3599)).await;
    assert_eq!(repository.len().await, 2);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(repository
        .get_by_hash(&hash_token("stale-refresh"))
        .await
        .unwrap()
        .is_none());
    assert!(repository
        .get_by_hash(&hash_token("live-refresh"))
        .await
        .unwrap()
        .is_some());
    assert!(!store.is_revoked("stale-access").await.unwrap());

    handle.shutdown().await;
}

#[test]
fn test_default_intervals_per_strategy() {
    assert_eq!(
        SweepConfig::for_strategy(RevocationStrategy::Memory).interval,
        Duration::from_secs(300)
    );
    assert_eq!(
        SweepConfig::for_strategy(RevocationStrategy::Persistent).interval,
        Duration::from_secs(3600)
    );
}
