//! Configuration module with sub-modules per concern
//!
//! - `cache` - Redis connection and key namespacing
//! - `environment` - Environment detection and logging configuration
//! - `session` - Token issuance and lifecycle settings

pub mod cache;
pub mod environment;
pub mod session;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use session::SessionConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Redis cache configuration
    pub cache: CacheConfig,

    /// Token lifecycle configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            cache: CacheConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cache: CacheConfig::default().with_prefix("sl_dev"),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            cache: CacheConfig::new("redis://redis:6379").with_prefix("sl"),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    ///
    /// Starts from the preset for the detected environment and applies
    /// the cache and session variables on top.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.cache = config.cache.merge_env();
        config.session = SessionConfig::from_env();
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config
    }
}
