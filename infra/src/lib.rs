//! # Infrastructure Layer
//!
//! Concrete storage for the token lifecycle service:
//! - **Cache**: Redis client with retry, plus the Redis-backed live store
//!   (`SET EX`/`GET`/`DEL`) and history store (`HSET`/`HGET`/`HGETALL`)
//! - **Bootstrap**: configuration loading and service wiring via [`initialize`]

use std::sync::Arc;

use sl_core::errors::DomainError;
use sl_core::{PrefixIndex, TokenLifecycleService, TokenServiceConfig};
use sl_shared::config::AppConfig;

/// Cache module - Redis client and token stores
pub mod cache;

use cache::{RedisClient, RedisExpiringStore, RedisHistoryStore};

/// Lifecycle service running on the Redis stores
pub type RedisTokenService = TokenLifecycleService<RedisExpiringStore, RedisHistoryStore>;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Loaded application configuration
    pub config: AppConfig,
    /// Shared Redis client
    pub redis: RedisClient,
    /// Token lifecycle service with an in-process user → token cache
    pub tokens: Arc<RedisTokenService>,
}

impl InfrastructureServices {
    /// Wire the Redis stores into a lifecycle service
    pub fn new(config: AppConfig, redis: RedisClient) -> Self {
        let live = RedisExpiringStore::new(redis.clone(), &config.session);
        let history = RedisHistoryStore::new(redis.clone(), &config.session);
        let tokens = TokenLifecycleService::new(
            live,
            history,
            TokenServiceConfig::from(&config.session),
        )
        .with_cache(PrefixIndex::new());

        Self {
            config,
            redis,
            tokens: Arc::new(tokens),
        }
    }
}

/// Initialize infrastructure services
///
/// Loads configuration (including a `.env` file if present), connects to
/// Redis and verifies the connection before wiring the lifecycle service.
pub async fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    let config = load_config()?;
    initialize_with(config).await
}

/// Initialize infrastructure services from an explicit configuration
pub async fn initialize_with(config: AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    let redis = RedisClient::new(config.cache.clone()).await?;
    if !redis.health_check().await? {
        return Err(InfrastructureError::General(
            "Redis health check failed".to_string(),
        ));
    }

    tracing::info!("Infrastructure services initialized successfully");
    Ok(InfrastructureServices::new(config, redis))
}

/// Load configuration from the environment
///
/// The environment's `.env` file (e.g. `.env.production`) is tried first,
/// then a plain `.env`; neither is required.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = sl_shared::config::Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    if config.cache.url.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "REDIS_URL must not be empty".to_string(),
        ));
    }
    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::BackingStoreUnavailable {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_maps_to_unavailable() {
        let err: DomainError = InfrastructureError::General("boom".to_string()).into();
        assert!(err.is_unavailable());
        assert_eq!(
            err,
            DomainError::BackingStoreUnavailable {
                message: "Infrastructure error: boom".to_string()
            }
        );
    }

    #[test]
    fn test_redis_error_maps_to_unavailable() {
        let redis_err = redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        let err: DomainError = InfrastructureError::from(redis_err).into();
        assert!(err.is_unavailable());
        assert!(!err.is_expected());
    }
}
