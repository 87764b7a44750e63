//! Versioned snapshot store
//!
//! This module keeps every committed trie version in an append-only list.
//! Readers resolve a version to its snapshot and walk it without holding any
//! lock; writers are serialized and publish each new snapshot in one step.

mod guard;
mod versioned;

pub use guard::ValueGuard;
pub use versioned::{TrieStore, Version};
