//! Store contracts the token lifecycle is written against.
//!
//! Both contracts are string-level, shaped after Redis string and hash
//! commands. Callers serialize records themselves.

pub mod expiring;
pub mod history;

pub use expiring::{ExpiringStore, InMemoryExpiringStore};
pub use history::{HistoryStore, InMemoryHistoryStore};
