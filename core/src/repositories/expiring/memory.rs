//! In-memory implementation of ExpiringStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::DomainError;

use super::r#trait::ExpiringStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` when the deadline does not fit in an `Instant`
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if deadline <= now)
    }
}

/// Process-local expiring store
///
/// Expired entries are invisible to reads immediately. They are evicted when
/// their key is written again or by [`InMemoryExpiringStore::purge_expired`].
/// Time is read from the tokio clock, so paused-time tests can advance past a
/// TTL.
#[derive(Debug, Default)]
pub struct InMemoryExpiringStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryExpiringStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|entry| !entry.is_expired(now)).count()
    }

    /// Whether no live entry is stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ExpiringStore for InMemoryExpiringStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        if ttl_seconds == 0 {
            return Err(DomainError::Validation {
                message: "ttl must be positive".to_string(),
            });
        }

        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            expires_at: now.checked_add(Duration::from_secs(ttl_seconds)),
        };

        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(key)
            .map(|entry| !entry.is_expired(now))
            .unwrap_or(false))
    }
}
