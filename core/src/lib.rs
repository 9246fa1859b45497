//! # SessionLedger Core
//!
//! Core domain layer for SessionLedger. This crate contains the token entities,
//! the character-level [`PrefixIndex`] cache, the store contracts the lifecycle
//! manager is written against (with in-memory implementations), the
//! [`TokenLifecycleService`] itself and the error taxonomy.

pub mod domain;
pub mod errors;
pub mod index;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use index::PrefixIndex;
pub use repositories::*;
pub use services::*;
