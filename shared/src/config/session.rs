//! Token lifecycle configuration

use serde::{Deserialize, Serialize};

/// Smallest accepted token size in bytes (128 bits of entropy)
pub const MIN_TOKEN_BYTES: usize = 16;

/// Longest accepted live window (100 years)
pub const MAX_TOKEN_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

/// Default live window of an issued token (10 days)
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 10 * 24 * 60 * 60;

/// Settings for token issuance and the backing store namespaces
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Time-to-live of a token in the live store, in seconds
    #[serde(default = "default_ttl")]
    pub token_ttl_seconds: u64,

    /// Random bytes per token before hex encoding
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,

    /// Draws attempted before giving up on a colliding token
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,

    /// Key namespace of the live (expiring) store
    #[serde(default = "default_live_namespace")]
    pub live_namespace: String,

    /// Key namespace of the per-user history hashes
    #[serde(default = "default_history_namespace")]
    pub history_namespace: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_ttl_seconds: default_ttl(),
            token_bytes: default_token_bytes(),
            max_generation_attempts: default_max_generation_attempts(),
            live_namespace: default_live_namespace(),
            history_namespace: default_history_namespace(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let token_ttl_seconds = std::env::var("SESSION_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.token_ttl_seconds);
        let token_bytes = std::env::var("SESSION_TOKEN_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.token_bytes);
        let max_generation_attempts = std::env::var("SESSION_MAX_GENERATION_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_generation_attempts);

        Self {
            token_ttl_seconds,
            token_bytes,
            max_generation_attempts,
            ..defaults
        }
        .normalized()
    }

    /// Set the token time-to-live in days
    pub fn with_ttl_days(mut self, days: u64) -> Self {
        self.token_ttl_seconds = days.saturating_mul(86400);
        self
    }

    /// Clamp values into range: TTL to one second..100 years, token size to at
    /// least 128 bits, attempts to at least one
    pub fn normalized(mut self) -> Self {
        self.token_ttl_seconds = self.token_ttl_seconds.clamp(1, MAX_TOKEN_TTL_SECONDS);
        self.token_bytes = self.token_bytes.max(MIN_TOKEN_BYTES);
        self.max_generation_attempts = self.max_generation_attempts.max(1);
        self
    }
}

fn default_ttl() -> u64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

fn default_token_bytes() -> usize {
    32
}

fn default_max_generation_attempts() -> u32 {
    3
}

fn default_live_namespace() -> String {
    String::from("token")
}

fn default_history_namespace() -> String {
    String::from("history")
}
