//! History store trait defining the interface for per-user token history.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::DomainError;

/// Hash-of-hashes store with no expiry
///
/// Each bucket (a user id) maps fields (token strings) to the latest
/// serialized record. Entries are retained indefinitely.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Upsert `field` in `bucket`
    async fn hset(&self, bucket: &str, field: &str, value: &str) -> Result<(), DomainError>;

    /// Read one field of a bucket
    async fn hget(&self, bucket: &str, field: &str) -> Result<Option<String>, DomainError>;

    /// Read a whole bucket; an unknown bucket yields an empty map
    async fn hgetall(&self, bucket: &str) -> Result<HashMap<String, String>, DomainError>;
}

#[async_trait]
impl<T: HistoryStore + ?Sized> HistoryStore for Arc<T> {
    async fn hset(&self, bucket: &str, field: &str, value: &str) -> Result<(), DomainError> {
        (**self).hset(bucket, field, value).await
    }

    async fn hget(&self, bucket: &str, field: &str) -> Result<Option<String>, DomainError> {
        (**self).hget(bucket, field).await
    }

    async fn hgetall(&self, bucket: &str) -> Result<HashMap<String, String>, DomainError> {
        (**self).hgetall(bucket).await
    }
}
