//! Token lifecycle service module
//!
//! This module handles every token state transition:
//! - Issuance into the live store with a time-to-live
//! - Validation against the live store
//! - Deactivation, reactivation and hard deletion
//! - Per-user history and the optional in-process cache

mod config;
mod generator;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use generator::{RandomTokenGenerator, TokenGenerator};
pub use service::TokenLifecycleService;
