//! Unit tests for the in-memory expiring store

use std::sync::Arc;
use std::time::Duration;

use crate::errors::DomainError;
use crate::repositories::expiring::{ExpiringStore, InMemoryExpiringStore};

#[tokio::test]
async fn test_set_get_delete() {
    let store = InMemoryExpiringStore::new();

    store.set("tok", "record", 60).await.unwrap();
    assert_eq!(store.get("tok").await.unwrap(), Some("record".to_string()));
    assert!(store.exists("tok").await.unwrap());

    assert!(store.delete("tok").await.unwrap());
    assert_eq!(store.get("tok").await.unwrap(), None);
    assert!(!store.delete("tok").await.unwrap());
}

#[tokio::test]
async fn test_set_replaces_value() {
    let store = InMemoryExpiringStore::new();
    store.set("tok", "v1", 60).await.unwrap();
    store.set("tok", "v2", 60).await.unwrap();

    assert_eq!(store.get("tok").await.unwrap(), Some("v2".to_string()));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_zero_ttl_is_rejected() {
    let store = InMemoryExpiringStore::new();
    let err = store.set("tok", "v", 0).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl() {
    let store = InMemoryExpiringStore::new();
    store.set("tok", "v", 10).await.unwrap();

    tokio::time::advance(Duration::from_secs(9)).await;
    assert!(store.exists("tok").await.unwrap());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(store.get("tok").await.unwrap(), None);
    assert!(!store.delete("tok").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_set_refreshes_expiry() {
    let store = InMemoryExpiringStore::new();
    store.set("tok", "v", 10).await.unwrap();

    tokio::time::advance(Duration::from_secs(8)).await;
    store.set("tok", "v", 10).await.unwrap();

    tokio::time::advance(Duration::from_secs(8)).await;
    assert!(store.exists("tok").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = InMemoryExpiringStore::new();
    store.set("short", "v", 5).await.unwrap();
    store.set("long", "v", 500).await.unwrap();

    tokio::time::advance(Duration::from_secs(6)).await;
    assert_eq!(store.len().await, 1);
    assert_eq!(store.purge_expired().await, 1);
    assert_eq!(store.purge_expired().await, 0);
    assert!(store.exists("long").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_set_only_touches_its_own_key() {
    let store = InMemoryExpiringStore::new();
    store.set("a", "v", 5).await.unwrap();
    store.set("b", "v", 5).await.unwrap();

    tokio::time::advance(Duration::from_secs(6)).await;
    store.set("a", "v", 5).await.unwrap();
    store.set("c", "v", 5).await.unwrap();

    // "b" expired but was not written again, so it waits for the purge
    assert_eq!(store.len().await, 2);
    assert_eq!(store.purge_expired().await, 1);
    assert!(store.exists("a").await.unwrap());
}

#[tokio::test]
async fn test_huge_ttl_never_expires() {
    let store = InMemoryExpiringStore::new();
    store.set("tok", "v", u64::MAX).await.unwrap();
    assert!(store.exists("tok").await.unwrap());
}

#[tokio::test]
async fn test_shared_through_arc() {
    let store = Arc::new(InMemoryExpiringStore::new());
    let writer = Arc::clone(&store);

    tokio::spawn(async move { writer.set("tok", "v", 60).await })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(store.get("tok").await.unwrap(), Some("v".to_string()));
}
