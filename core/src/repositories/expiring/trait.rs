//! Expiring store trait defining the interface for the live token index.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::DomainError;

/// Key/value store whose entries vanish after a time-to-live
///
/// This is the "is this token currently live" index. Implementations must
/// guarantee that a key is absent once `ttl_seconds` have elapsed; eviction
/// timing beyond that is best-effort.
///
/// Collaborator failures are reported as `DomainError::BackingStoreUnavailable`.
#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous entry and its expiry
    ///
    /// # Arguments
    /// * `key` - Entry key
    /// * `value` - Serialized value
    /// * `ttl_seconds` - Time to live, must be positive
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Read the value under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Entry exists and has not expired
    /// * `Ok(None)` - Never stored, deleted, or expired
    /// * `Err(DomainError)` - Store unavailable
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Remove `key`
    ///
    /// # Returns
    /// * `Ok(true)` - An entry was removed
    /// * `Ok(false)` - Nothing was stored under `key`
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Check whether `key` currently holds a live entry
    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }
}

#[async_trait]
impl<T: ExpiringStore + ?Sized> ExpiringStore for Arc<T> {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        (**self).set(key, value, ttl_seconds).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key).await
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        (**self).delete(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        (**self).exists(key).await
    }
}
