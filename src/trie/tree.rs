//! Persistent trie implementation

use super::{TrieNode, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An immutable handle to a trie version
///
/// `put` and `remove` return a new `Trie` and never touch the nodes of the
/// one they were called on. Cloning a `Trie` only clones the root handle.
///
/// Two tries are equal when they share the same root node. Tries built
/// independently with the same contents are not equal.
#[derive(Clone, Default)]
pub struct Trie {
    root: Option<Arc<TrieNode>>,
}

impl Trie {
    /// Create an empty trie
    pub fn new() -> Self {
        Trie { root: None }
    }

    /// The root node, if the trie holds anything
    pub fn root(&self) -> Option<&Arc<TrieNode>> {
        self.root.as_ref()
    }

    /// Check if this trie has no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Check if both tries share the same root node
    pub fn ptr_eq(&self, other: &Trie) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Get the value stored under `key`
    ///
    /// Returns `None` if the key is missing or its value is not a `T`.
    pub fn get<T: Any>(&self, key: impl AsRef<[u8]>) -> Option<&T> {
        self.find(key.as_ref())?.value::<T>()
    }

    /// Check if `key` holds a value of any type
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.find(key.as_ref())
            .is_some_and(|node| node.has_value())
    }

    /// Return a new trie with `key` mapped to `value`
    ///
    /// Any keys that extend `key` are kept.
    pub fn put<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>, value: T) -> Trie {
        let key = key.as_ref();
        let value: Value = Arc::new(value);

        // Old node at each depth along the key, while the old path exists
        let mut path: Vec<Option<&TrieNode>> = Vec::with_capacity(key.len() + 1);
        let mut node = self.root.as_deref();
        path.push(node);
        for &symbol in key {
            node = node.and_then(|n| n.child(symbol)).map(|child| &**child);
            path.push(node);
        }

        // Keep whatever hangs below the old node at the terminal position
        let terminal = path.pop().flatten();
        let children = terminal.map(|n| n.children().clone()).unwrap_or_default();
        let mut rebuilt = Arc::new(TrieNode::with_shared_value(children, value));

        for (&symbol, old) in key.iter().zip(path).rev() {
            let mut updated = old.cloned().unwrap_or_default();
            updated.children_mut().insert(symbol, rebuilt);
            rebuilt = Arc::new(updated);
        }

        Trie {
            root: Some(rebuilt),
        }
    }

    /// Return a new trie without `key`
    ///
    /// Branches left with no value and no children are pruned. If `key`
    /// is absent the returned trie is equal to `self`.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Trie {
        let key = key.as_ref();
        let Some(root) = self.root.as_deref() else {
            return self.clone();
        };

        // Nodes above the terminal, one per key byte
        let mut path: Vec<&TrieNode> = Vec::with_capacity(key.len());
        let mut node = root;
        for &symbol in key {
            let Some(child) = node.child(symbol) else {
                return self.clone();
            };
            path.push(node);
            node = child;
        }
        if !node.has_value() {
            return self.clone();
        }

        // `None` marks a node left with no value and no children; its
        // parent drops the edge to it. The root is never marked.
        let mut rebuilt = if !key.is_empty() && node.is_leaf() {
            None
        } else {
            Some(TrieNode::with_children(node.children().clone()))
        };

        for (depth, (&symbol, parent)) in key.iter().zip(path).enumerate().rev() {
            let mut updated = parent.clone();
            match rebuilt {
                None => {
                    updated.children_mut().remove(&symbol);
                }
                Some(child) => {
                    updated.children_mut().insert(symbol, Arc::new(child));
                }
            }

            rebuilt = if depth != 0 && updated.is_leaf() && !updated.has_value() {
                None
            } else {
                Some(updated)
            };
        }

        match rebuilt {
            Some(new_root) if new_root.has_value() || !new_root.is_leaf() => Trie {
                root: Some(Arc::new(new_root)),
            },
            _ => Trie::new(),
        }
    }

    /// Count the nodes reachable from the root
    pub fn node_count(&self) -> usize {
        let mut stack: Vec<&TrieNode> = self.root.as_deref().into_iter().collect();
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children().values().map(|child| &**child));
        }
        count
    }

    pub(crate) fn get_shared<T: Any + Send + Sync>(&self, key: &[u8]) -> Option<Arc<T>> {
        let value = Arc::clone(self.find(key)?.shared_value()?);
        value.downcast::<T>().ok()
    }

    // === Internal helpers ===

    fn find(&self, key: &[u8]) -> Option<&Arc<TrieNode>> {
        let mut node = self.root.as_ref()?;
        for &symbol in key {
            node = node.child(symbol)?;
        }
        Some(node)
    }
}

impl PartialEq for Trie {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Trie {}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("root", &self.root.as_ref().map(Arc::as_ptr))
            .finish()
    }
}
