//! Shared configuration and logging setup for the SessionLedger crates
//!
//! This crate provides functionality used by both the core and the infrastructure layer:
//! - Configuration types (environment, cache, session, logging)
//! - Tracing subscriber initialisation

pub mod config;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, Environment, LogFormat, LoggingConfig, SessionConfig,
};
pub use logging::init_tracing;
