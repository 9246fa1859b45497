//! Redis cache client implementation
//!
//! Wraps a multiplexed connection with connection and response timeouts,
//! database selection and retry with exponential backoff for transient errors.
//! Provides the string and hash commands the token stores are built on.

use redis::{
    aio::MultiplexedConnection, AsyncCommands, Client, IntoConnectionInfo, RedisError,
    RedisResult,
};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use sl_core::errors::mask_token;
use sl_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Upper bound of the backoff between two attempts
const MAX_RETRY_DELAY_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with retry logic
///
/// Cheap to clone; clones share the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl RedisClient {
    /// Connect to Redis
    ///
    /// Retries the initial connection `config.max_retries` times with
    /// exponential backoff starting at `config.retry_delay_ms`.
    ///
    /// # Example
    /// ```no_run
    /// use sl_infra::cache::RedisClient;
    /// use sl_shared::config::CacheConfig;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_prefix("sl");
    ///     let client = RedisClient::new(config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let config = config.normalized();
        info!(
            url = %mask_url(&config.url),
            database = config.database,
            "Creating Redis client"
        );

        let mut info = config.url.as_str().into_connection_info().map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;
        if config.database > 0 {
            info.redis.db = i64::from(config.database);
        }

        let client = Client::open(info).map_err(|e| {
            error!("Failed to open Redis client: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(&client, &config).await?;

        info!("Redis client created successfully");
        Ok(Self { connection, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    async fn create_connection_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let max_attempts = config.max_retries.max(1);
        let connect_timeout = Duration::from_secs(config.connection_timeout);
        let mut attempts = 0;
        let mut delay = config.retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection())
                .await
            {
                Ok(result) => result,
                Err(_) => Err(timed_out("connect")),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = delay.saturating_mul(2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => {
                    error!(
                        "Failed to connect to Redis after {} attempts: {}",
                        attempts, e
                    );
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set a value with expiration time (`SET key value EX seconds`)
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        if expiry_seconds == 0 {
            return Err(InfrastructureError::General(
                "expiry must be at least one second".to_string(),
            ));
        }
        debug!("Setting key '{}' with expiry {}s", redact_key(key), expiry_seconds);

        let key_owned = key.to_string();
        let value = value.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            let value = value.clone();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", redact_key(key), e);
            InfrastructureError::Cache(e)
        })
    }

    /// Get a value, `None` when the key is missing or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", redact_key(key));

        let key_owned = key.to_string();
        let value = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move { conn.get::<_, Option<String>>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to get key '{}': {}", redact_key(key), e);
                InfrastructureError::Cache(e)
            })?;

        if value.is_none() {
            debug!("Key '{}' not found", redact_key(key));
        }
        Ok(value)
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", redact_key(key));

        let key_owned = key.to_string();
        let deleted_count = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to delete key '{}': {}", redact_key(key), e);
                InfrastructureError::Cache(e)
            })?;

        Ok(deleted_count > 0)
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key_owned = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to check key '{}' existence: {}", redact_key(key), e);
            InfrastructureError::Cache(e)
        })
    }

    /// Remaining time-to-live of a key
    ///
    /// `None` when the key does not exist or carries no expiry.
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let key_owned = key.to_string();
        let ttl = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to get TTL for key '{}': {}", redact_key(key), e);
                InfrastructureError::Cache(e)
            })?;

        Ok((ttl >= 0).then_some(ttl))
    }

    /// Set one field of a hash (`HSET`)
    pub async fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), InfrastructureError> {
        debug!("Setting field '{}' of hash '{}'", mask_token(field), redact_key(key));

        let key_owned = key.to_string();
        let field = field.to_string();
        let value = value.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            let field = field.clone();
            let value = value.clone();
            Box::pin(async move { conn.hset::<_, _, _, ()>(key, field, value).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set hash field in '{}': {}", redact_key(key), e);
            InfrastructureError::Cache(e)
        })
    }

    /// Read one field of a hash (`HGET`)
    pub async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, InfrastructureError> {
        let key_owned = key.to_string();
        let field = field.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            let field = field.clone();
            Box::pin(async move { conn.hget::<_, _, Option<String>>(key, field).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to read hash field in '{}': {}", redact_key(key), e);
            InfrastructureError::Cache(e)
        })
    }

    /// Read every field of a hash (`HGETALL`); empty for a missing key
    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, InfrastructureError> {
        let key_owned = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            Box::pin(async move { conn.hgetall::<_, HashMap<String, String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to read hash '{}': {}", redact_key(key), e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move {
                    redis::cmd("PING").query_async::<_, String>(&mut conn).await
                })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Run an operation, retrying transient failures with exponential backoff
    ///
    /// Each attempt is bounded by the configured response timeout; a timeout
    /// counts as an I/O error and is retried.
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let max_attempts = self.config.max_retries.max(1);
        let response_timeout = Duration::from_secs(self.config.response_timeout);
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            let result = match timeout(response_timeout, operation(conn)).await {
                Ok(result) => result,
                Err(_) => Err(timed_out("response")),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) if attempts < max_attempts && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = delay.saturating_mul(2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

fn timed_out(stage: &str) -> RedisError {
    RedisError::from(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        format!("Redis {} timed out", stage),
    ))
}

/// Mask the last `:`-separated segment of a key for logging
///
/// Keys end in a token or a user id; the namespace part stays readable.
pub(crate) fn redact_key(key: &str) -> String {
    match key.rsplit_once(':') {
        Some((namespace, last)) => format!("{}:{}", namespace, mask_token(last)),
        None => mask_token(key),
    }
}

/// Whether an error is transient and the operation worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
