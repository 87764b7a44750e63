//! Persistent trie with structural sharing
//!
//! This implements a copy-on-write prefix tree where:
//! - Every update returns a new trie and leaves the old one untouched
//! - Only the nodes on the updated key's path are reallocated
//! - Every other subtree is shared by reference across versions

mod node;
mod tree;

pub use node::{Children, TrieNode, Value};
pub use tree::Trie;
