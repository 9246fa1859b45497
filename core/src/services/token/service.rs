//! Token lifecycle service implementation

use std::sync::RwLock;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::token::{TokenRecord, TokenStatus};
use crate::errors::{mask_token, DomainError, TokenError};
use crate::index::PrefixIndex;
use crate::repositories::{ExpiringStore, HistoryStore};

use super::config::TokenServiceConfig;
use super::generator::{RandomTokenGenerator, TokenGenerator};

/// Service owning every token state transition
///
/// The live store holds active tokens keyed by token string with a TTL; the
/// history store holds the latest snapshot of every token per user. The two
/// writes of a transition are not atomic: issuance and reactivation write the
/// live store first, deactivation and deletion write history first.
///
/// An optional [`PrefixIndex`] maps each user id to the token most recently
/// issued or reactivated for them, for callers that only need a
/// process-local lookup.
pub struct TokenLifecycleService<E: ExpiringStore, H: HistoryStore> {
    live: E,
    history: H,
    config: TokenServiceConfig,
    generator: Box<dyn TokenGenerator>,
    cache: Option<RwLock<PrefixIndex<String>>>,
}

impl<E: ExpiringStore, H: HistoryStore> TokenLifecycleService<E, H> {
    /// Creates a new lifecycle service
    ///
    /// # Arguments
    ///
    /// * `live` - Expiring store holding active tokens
    /// * `history` - Per-user history store
    /// * `config` - Service configuration, clamped to its floors
    pub fn new(live: E, history: H, config: TokenServiceConfig) -> Self {
        let config = config.normalized();
        let generator = Box::new(RandomTokenGenerator::new(config.token_bytes));

        Self {
            live,
            history,
            config,
            generator,
            cache: None,
        }
    }

    /// Attach an in-process user id → token cache
    pub fn with_cache(mut self, cache: PrefixIndex<String>) -> Self {
        self.cache = Some(RwLock::new(cache));
        self
    }

    /// Replace the token generator
    pub fn with_generator(mut self, generator: impl TokenGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    /// The effective configuration
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a new active token for a user
    ///
    /// # Returns
    ///
    /// * `Ok(TokenRecord)` - The issued record, already live and in history
    /// * `Err(DomainError::Validation)` - Empty user id
    /// * `Err(DomainError::Token)` - No non-colliding token could be drawn
    /// * `Err(DomainError::BackingStoreUnavailable)` - A store call failed
    pub async fn issue(&self, user_id: &str) -> Result<TokenRecord, DomainError> {
        if user_id.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "user id must not be empty".to_string(),
            });
        }

        let token = self.fresh_token().await?;
        let record = TokenRecord::new(token, user_id, self.config.token_ttl_seconds);
        let json = record.to_json()?;

        self.live
            .set(&record.token, &json, self.config.token_ttl_seconds)
            .await?;
        self.history.hset(user_id, &record.token, &json).await?;
        self.cache_put(user_id, &record.token);

        info!(
            user_id = %user_id,
            token = %mask_token(&record.token),
            expires_at = %record.expires_at,
            "Token issued"
        );
        Ok(record)
    }

    /// Looks up a live token
    ///
    /// Pure read: never-issued, expired and deactivated tokens all answer
    /// `NotFound`.
    pub async fn validate(&self, token: &str) -> Result<TokenRecord, DomainError> {
        if token.is_empty() {
            return Err(DomainError::token_not_found(token));
        }

        match self.live.get(token).await? {
            Some(raw) => TokenRecord::from_json(&raw),
            None => {
                debug!(token = %mask_token(token), "Token not live");
                Err(DomainError::token_not_found(token))
            }
        }
    }

    /// Deactivates a live token (logout)
    ///
    /// The updated record goes to history and the token leaves the live store.
    pub async fn deactivate(&self, token: &str) -> Result<TokenRecord, DomainError> {
        let mut record = self.validate(token).await?;
        record.deactivate()?;
        let json = record.to_json()?;

        self.history.hset(&record.user_id, token, &json).await?;
        self.live.delete(token).await?;
        self.cache_evict(&record.user_id, token);

        info!(
            user_id = %record.user_id,
            token = %mask_token(token),
            "Token deactivated"
        );
        Ok(record)
    }

    /// Reactivates an inactive token from the user's history
    ///
    /// A token whose history entry is active but whose live window lapsed is
    /// renewed the same way. A token that is still live answers
    /// `AlreadyActive` and nothing is written.
    pub async fn reactivate(&self, user_id: &str, token: &str) -> Result<TokenRecord, DomainError> {
        let mut record = self.history_record(user_id, token).await?;
        let still_live = record.is_active() && self.live.exists(token).await?;

        match record.status {
            TokenStatus::Deleted => {
                debug!(token = %mask_token(token), "Reactivation of deleted token refused");
                return Err(DomainError::deleted(token));
            }
            TokenStatus::Active if still_live => {
                debug!(token = %mask_token(token), "Token already active");
                return Err(DomainError::already_active(token));
            }
            TokenStatus::Active => record.renew(self.config.token_ttl_seconds)?,
            TokenStatus::Inactive => record.reactivate(self.config.token_ttl_seconds)?,
        }

        let json = record.to_json()?;
        self.live
            .set(token, &json, self.config.token_ttl_seconds)
            .await?;
        self.history.hset(user_id, token, &json).await?;
        self.cache_put(user_id, token);

        info!(
            user_id = %user_id,
            token = %mask_token(token),
            expires_at = %record.expires_at,
            "Token reactivated"
        );
        Ok(record)
    }

    /// Every history entry of a user, oldest first
    ///
    /// Unknown users yield an empty list. Entries that cannot be parsed are
    /// skipped with a warning.
    pub async fn history(&self, user_id: &str) -> Result<Vec<TokenRecord>, DomainError> {
        let entries = self.history.hgetall(user_id).await?;

        let mut records: Vec<TokenRecord> = entries
            .into_iter()
            .filter_map(|(token, raw)| match TokenRecord::from_json(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        user_id = %user_id,
                        token = %mask_token(&token),
                        error = %e,
                        "Skipping unreadable history entry"
                    );
                    None
                }
            })
            .collect();

        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.token.cmp(&b.token))
        });
        Ok(records)
    }

    /// History entries that are active and inside their live window
    pub async fn active_tokens(&self, user_id: &str) -> Result<Vec<TokenRecord>, DomainError> {
        let now = Utc::now();
        Ok(self
            .history(user_id)
            .await?
            .into_iter()
            .filter(|record| record.is_active() && record.expires_at > now)
            .collect())
    }

    /// Hard-deletes a token
    ///
    /// The token leaves the live store for good; its history entry stays as a
    /// tombstone with status `deleted`. Deleting again returns the tombstone.
    pub async fn delete(&self, user_id: &str, token: &str) -> Result<TokenRecord, DomainError> {
        let mut record = self.history_record(user_id, token).await?;
        if record.is_deleted() {
            return Ok(record);
        }

        record.mark_deleted();
        let json = record.to_json()?;

        self.history.hset(user_id, token, &json).await?;
        self.live.delete(token).await?;
        self.cache_evict(user_id, token);

        info!(
            user_id = %user_id,
            token = %mask_token(token),
            "Token deleted"
        );
        Ok(record)
    }

    /// Deactivates every active token of a user, returning how many changed
    pub async fn deactivate_all(&self, user_id: &str) -> Result<usize, DomainError> {
        let mut count = 0;

        for mut record in self.history(user_id).await? {
            if !record.is_active() {
                continue;
            }
            record.deactivate()?;
            let json = record.to_json()?;

            self.history.hset(user_id, &record.token, &json).await?;
            self.live.delete(&record.token).await?;
            self.cache_evict(user_id, &record.token);
            count += 1;
        }

        info!(user_id = %user_id, count, "Deactivated all tokens");
        Ok(count)
    }

    /// Fast-path lookup of the latest token for a user in the local cache
    ///
    /// Returns `None` when no cache is attached. A cached token may already
    /// have expired in the live store; call [`Self::validate`] when that matters.
    pub fn cached_token(&self, user_id: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        let index = cache.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        index.search(user_id).cloned()
    }

    async fn history_record(&self, user_id: &str, token: &str) -> Result<TokenRecord, DomainError> {
        match self.history.hget(user_id, token).await? {
            Some(raw) => TokenRecord::from_json(&raw),
            None => {
                debug!(
                    user_id = %user_id,
                    token = %mask_token(token),
                    "Token not in history"
                );
                Err(DomainError::token_not_found(token))
            }
        }
    }

    async fn fresh_token(&self) -> Result<String, DomainError> {
        for attempt in 1..=self.config.max_generation_attempts {
            let candidate = self.generator.generate();
            if !self.live.exists(&candidate).await? {
                return Ok(candidate);
            }
            warn!(
                attempt,
                max_attempts = self.config.max_generation_attempts,
                "Generated token collides with a live token"
            );
        }
        Err(TokenError::TokenGenerationFailed.into())
    }

    fn cache_put(&self, user_id: &str, token: &str) {
        if let Some(cache) = &self.cache {
            let mut index = cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            index.insert(user_id, token.to_string());
        }
    }

    fn cache_evict(&self, user_id: &str, token: &str) {
        if let Some(cache) = &self.cache {
            let mut index = cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            if index.search(user_id).map(String::as_str) == Some(token) {
                index.delete(user_id);
            }
        }
    }
}
