//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub connection_timeout: u64,

    /// Response timeout in seconds, applied to every command
    #[serde(default = "default_timeout")]
    pub response_timeout: u64,

    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubled per attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Prefix prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Redis database number (0-15); 0 keeps whatever the URL selects
    #[serde(default)]
    pub database: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: default_timeout(),
            response_timeout: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: None,
            database: 0,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Override fields with any REDIS_* variables that are set
    pub fn merge_env(mut self) -> Self {
        if let Ok(url) = std::env::var("REDIS_URL") {
            self.url = url;
        }
        if let Some(timeout) = parse_env("REDIS_CONNECTION_TIMEOUT") {
            self.connection_timeout = timeout;
        }
        if let Some(timeout) = parse_env("REDIS_RESPONSE_TIMEOUT") {
            self.response_timeout = timeout;
        }
        if let Some(retries) = parse_env("REDIS_MAX_RETRIES") {
            self.max_retries = retries;
        }
        if let Some(delay) = parse_env("REDIS_RETRY_DELAY_MS") {
            self.retry_delay_ms = delay;
        }
        if let Ok(prefix) = std::env::var("REDIS_KEY_PREFIX") {
            self.key_prefix = Some(prefix).filter(|p| !p.is_empty());
        }
        if let Some(db) = parse_env::<u8>("REDIS_DATABASE") {
            self = self.with_database(db);
        }
        self.normalized()
    }

    /// Raise timeouts and the retry count to at least one
    pub fn normalized(mut self) -> Self {
        self.connection_timeout = self.connection_timeout.max(1);
        self.response_timeout = self.response_timeout.max(1);
        self.max_retries = self.max_retries.max(1);
        self
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn default_timeout() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.database, 0);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_cache_config_with_prefix() {
        let config = CacheConfig::new("redis://cache:6379")
            .with_prefix("sl")
            .with_database(2);

        assert_eq!(config.make_key("live:abc"), "sl:live:abc");
        assert_eq!(config.database, 2);
    }

    #[test]
    fn test_cache_key_without_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("history:42"), "history:42");
    }

    #[test]
    fn test_normalized_floors_timeouts() {
        let mut config = CacheConfig::default();
        config.connection_timeout = 0;
        config.response_timeout = 0;
        config.max_retries = 0;

        let config = config.normalized();
        assert_eq!(config.connection_timeout, 1);
        assert_eq!(config.response_timeout, 1);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_merge_env_reads_retry_delay() {
        std::env::set_var("REDIS_RETRY_DELAY_MS", "250");
        let config = CacheConfig::default().merge_env();
        std::env::remove_var("REDIS_RETRY_DELAY_MS");

        assert_eq!(config.retry_delay_ms, 250);
    }

    #[test]
    fn test_database_is_clamped() {
        let config = CacheConfig::default().with_database(40);
        assert_eq!(config.database, 15);
    }
}
