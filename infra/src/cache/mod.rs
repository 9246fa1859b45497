//! Cache module for Redis-backed storage
//!
//! Provides the Redis client with retry logic and the live/history token
//! stores built on top of it.

pub mod redis_client;
pub mod session_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use session_store::{RedisExpiringStore, RedisHistoryStore};

// Re-export commonly used types
pub use sl_shared::config::cache::CacheConfig;
