//! Per-user history hash store module.

mod r#trait;
pub use r#trait::HistoryStore;

mod memory;
pub use memory::InMemoryHistoryStore;

#[cfg(test)]
mod tests;
