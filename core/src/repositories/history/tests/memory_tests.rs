//! Unit tests for the in-memory history store

use crate::repositories::history::{HistoryStore, InMemoryHistoryStore};

#[tokio::test]
async fn test_hset_hget() {
    let store = InMemoryHistoryStore::new();
    store.hset("user-1", "tok-a", "r1").await.unwrap();

    assert_eq!(store.hget("user-1", "tok-a").await.unwrap(), Some("r1".to_string()));
    assert_eq!(store.hget("user-1", "tok-b").await.unwrap(), None);
    assert_eq!(store.hget("user-2", "tok-a").await.unwrap(), None);
}

#[tokio::test]
async fn test_hset_overwrites_field() {
    let store = InMemoryHistoryStore::new();
    store.hset("user-1", "tok-a", "r1").await.unwrap();
    store.hset("user-1", "tok-a", "r2").await.unwrap();

    let all = store.hgetall("user-1").await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all.get("tok-a"), Some(&"r2".to_string()));
}

#[tokio::test]
async fn test_hgetall_groups_by_bucket() {
    let store = InMemoryHistoryStore::new();
    store.hset("user-1", "tok-a", "r1").await.unwrap();
    store.hset("user-1", "tok-b", "r2").await.unwrap();
    store.hset("user-2", "tok-c", "r3").await.unwrap();

    assert_eq!(store.hgetall("user-1").await.unwrap().len(), 2);
    assert_eq!(store.hgetall("user-2").await.unwrap().len(), 1);
    assert!(store.hgetall("nobody").await.unwrap().is_empty());
    assert_eq!(store.bucket_count().await, 2);
}
