//! Configuration for the token lifecycle service

use sl_shared::config::session::{
    SessionConfig, DEFAULT_TOKEN_TTL_SECONDS, MAX_TOKEN_TTL_SECONDS, MIN_TOKEN_BYTES,
};

/// Configuration for the token lifecycle service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Live window of an issued or reactivated token, in seconds
    pub token_ttl_seconds: u64,
    /// Random bytes per generated token
    pub token_bytes: usize,
    /// Draws attempted before issuance gives up on colliding tokens
    pub max_generation_attempts: u32,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            token_bytes: 32,
            max_generation_attempts: 3,
        }
    }
}

impl TokenServiceConfig {
    /// Clamp values into range
    ///
    /// The TTL is bounded above as well, so the live-store expiry and the
    /// record's `expires_at` always describe the same window.
    pub fn normalized(self) -> Self {
        Self {
            token_ttl_seconds: self.token_ttl_seconds.clamp(1, MAX_TOKEN_TTL_SECONDS),
            token_bytes: self.token_bytes.max(MIN_TOKEN_BYTES),
            max_generation_attempts: self.max_generation_attempts.max(1),
        }
    }
}

impl From<&SessionConfig> for TokenServiceConfig {
    fn from(session: &SessionConfig) -> Self {
        Self {
            token_ttl_seconds: session.token_ttl_seconds,
            token_bytes: session.token_bytes,
            max_generation_attempts: session.max_generation_attempts,
        }
        .normalized()
    }
}
