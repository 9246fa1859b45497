//! In-memory implementation of HistoryStore

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::HistoryStore;

/// Process-local history store
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    buckets: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buckets (users) that have at least one field
    pub async fn bucket_count(&self) -> usize {
        self.buckets.read().await.len()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn hset(&self, bucket: &str, field: &str, value: &str) -> Result<(), DomainError> {
        let mut buckets = self.buckets.write().await;
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hget(&self, bucket: &str, field: &str) -> Result<Option<String>, DomainError> {
        let buckets = self.buckets.read().await;
        Ok(buckets.get(bucket).and_then(|fields| fields.get(field)).cloned())
    }

    async fn hgetall(&self, bucket: &str) -> Result<HashMap<String, String>, DomainError> {
        let buckets = self.buckets.read().await;
        Ok(buckets.get(bucket).cloned().unwrap_or_default())
    }
}
