//! # cow_trie
//!
//! A persistent, copy-on-write trie with a versioned snapshot store.
//!
//! Every write produces a new trie that shares all untouched subtrees with
//! the version it was built from, so keeping every historical version costs
//! only the nodes on each written key's path.
//!
//! ## Core Concepts
//!
//! - **Trie**: An immutable handle to a root node; `put`/`remove` return new tries
//! - **Nodes**: Reference-counted branch points that may carry a value of any type
//! - **Snapshots**: Every committed write in a [`TrieStore`] gets a version number
//! - **Guards**: A [`ValueGuard`] keeps the snapshot it was read from alive
//!
//! ## Example
//!
//! ```
//! use cow_trie::{Trie, TrieStore};
//!
//! let trie = Trie::new().put("hello", 42u32);
//! assert_eq!(trie.get::<u32>("hello"), Some(&42));
//! assert_eq!(trie.get::<String>("hello"), None);
//!
//! let store = TrieStore::new();
//! let v1 = store.put("x", 1u32);
//! store.put("x", 2u32);
//! assert_eq!(*store.get_at::<u32>("x", v1).unwrap(), 1);
//! assert_eq!(*store.get::<u32>("x").unwrap(), 2);
//! ```

pub mod config;
pub mod store;
pub mod trie;

mod error;

#[cfg(test)]
mod proptests;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use store::{TrieStore, ValueGuard, Version};
pub use trie::{Trie, TrieNode};
