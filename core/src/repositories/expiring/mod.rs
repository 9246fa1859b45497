//! Expiring key/value store module.

mod r#trait;
pub use r#trait::ExpiringStore;

mod memory;
pub use memory::InMemoryExpiringStore;

#[cfg(test)]
mod tests;
