//! Redis-backed token stores
//!
//! Key patterns, each behind the optional `CacheConfig::key_prefix`:
//! - `{prefix}:{live_namespace}:{token}` - live record, `SET ... EX ttl`
//! - `{prefix}:{history_namespace}:{user_id}` - hash of token → latest record

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use sl_core::errors::DomainError;
use sl_core::repositories::{ExpiringStore, HistoryStore};
use sl_shared::config::{CacheConfig, SessionConfig};

use crate::cache::RedisClient;

pub(crate) fn key_base(cache: &CacheConfig, namespace: &str) -> String {
    cache.make_key(namespace)
}

/// Live token store on Redis strings with native expiry
#[derive(Clone)]
pub struct RedisExpiringStore {
    client: RedisClient,
    base: String,
}

impl RedisExpiringStore {
    pub fn new(client: RedisClient, session: &SessionConfig) -> Self {
        let base = key_base(client.config(), &session.live_namespace);
        Self { client, base }
    }

    /// Full Redis key of a token
    pub fn key_for(&self, token: &str) -> String {
        format!("{}:{}", self.base, token)
    }

    /// Remaining live window of a token in seconds
    pub async fn remaining_ttl(&self, token: &str) -> Result<Option<i64>, DomainError> {
        Ok(self.client.ttl(&self.key_for(token)).await?)
    }
}

#[async_trait]
impl ExpiringStore for RedisExpiringStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        if ttl_seconds == 0 {
            return Err(DomainError::Validation {
                message: "ttl must be positive".to_string(),
            });
        }
        self.client
            .set_with_expiry(&self.key_for(key), value, ttl_seconds)
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(&self.key_for(key)).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.client.delete(&self.key_for(key)).await?)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key_for(key)).await?)
    }
}

/// Per-user history on Redis hashes, without expiry
#[derive(Clone)]
pub struct RedisHistoryStore {
    client: RedisClient,
    base: String,
}

impl RedisHistoryStore {
    pub fn new(client: RedisClient, session: &SessionConfig) -> Self {
        let base = key_base(client.config(), &session.history_namespace);
        Self { client, base }
    }

    /// Full Redis key of a user's history hash
    pub fn key_for(&self, bucket: &str) -> String {
        format!("{}:{}", self.base, bucket)
    }
}

#[async_trait]
impl HistoryStore for RedisHistoryStore {
    async fn hset(&self, bucket: &str, field: &str, value: &str) -> Result<(), DomainError> {
        self.client.hset(&self.key_for(bucket), field, value).await?;
        Ok(())
    }

    async fn hget(&self, bucket: &str, field: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.hget(&self.key_for(bucket), field).await?)
    }

    async fn hgetall(&self, bucket: &str) -> Result<HashMap<String, String>, DomainError> {
        let entries = self.client.hgetall(&self.key_for(bucket)).await?;
        debug!(bucket = %bucket, entries = entries.len(), "Loaded history hash");
        Ok(entries)
    }
}
