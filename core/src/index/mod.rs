//! Process-local identifier index.
//!
//! [`PrefixIndex`] is a plain character-level trie used as a low-latency cache
//! from an identifier (user id or token string) to a value. It has no expiry
//! or history concept and no internal synchronization.

mod prefix_index;


pub use prefix_index::PrefixIndex;
