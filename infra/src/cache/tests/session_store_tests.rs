//! Tests for the Redis-backed token stores

use std::time::Duration;

use crate::cache::session_store::key_base;
use crate::cache::{RedisClient, RedisExpiringStore, RedisHistoryStore};
use sl_core::errors::DomainError;
use sl_core::repositories::{ExpiringStore, HistoryStore};
use sl_shared::config::{CacheConfig, SessionConfig};

#[test]
fn test_key_layout() {
    let cache = CacheConfig::new("redis://localhost:6379").with_prefix("sl");
    assert_eq!(key_base(&cache, "token"), "sl:token");
    assert_eq!(key_base(&cache, "history"), "sl:history");

    let bare = CacheConfig::new("redis://localhost:6379");
    assert_eq!(key_base(&bare, "token"), "token");
}

async fn live_stores(namespace: &str) -> (RedisExpiringStore, RedisHistoryStore) {
    let cache = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix("sl_test");
    let session = SessionConfig {
        live_namespace: format!("{}:token", namespace),
        history_namespace: format!("{}:history", namespace),
        ..Default::default()
    };

    let client = RedisClient::new(cache).await.unwrap();
    (
        RedisExpiringStore::new(client.clone(), &session),
        RedisHistoryStore::new(client, &session),
    )
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_expiring_store_round_trip() {
    let (live, _) = live_stores("store_rt").await;

    assert_eq!(live.key_for("abc"), "sl_test:store_rt:token:abc");

    live.set("abc", "record", 60).await.unwrap();
    assert_eq!(live.get("abc").await.unwrap(), Some("record".to_string()));
    assert!(live.exists("abc").await.unwrap());

    let ttl = live.remaining_ttl("abc").await.unwrap().unwrap();
    assert!(ttl > 0 && ttl <= 60);

    assert!(live.delete("abc").await.unwrap());
    assert!(!live.delete("abc").await.unwrap());
    assert_eq!(live.get("abc").await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_expiring_store_rejects_zero_ttl() {
    let (live, _) = live_stores("store_zero").await;
    let err = live.set("abc", "record", 0).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_expiring_store_entry_lapses() {
    let (live, _) = live_stores("store_lapse").await;

    live.set("short", "record", 1).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(live.get("short").await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_history_store_round_trip() {
    let (_, history) = live_stores("store_hist").await;
    let user = "user-history-rt";

    assert!(history.hgetall(user).await.unwrap().is_empty());

    history.hset(user, "t1", "first").await.unwrap();
    history.hset(user, "t2", "second").await.unwrap();
    history.hset(user, "t1", "updated").await.unwrap();

    assert_eq!(history.hget(user, "t1").await.unwrap(), Some("updated".to_string()));
    assert_eq!(history.hget(user, "t3").await.unwrap(), None);
    assert_eq!(history.hgetall(user).await.unwrap().len(), 2);
}
