//! Trie node types

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A type-erased value held by a node, shared between every node cloned from it
pub type Value = Arc<dyn Any + Send + Sync>;

/// Children of a node, indexed by the next key byte
pub type Children = BTreeMap<u8, Arc<TrieNode>>;

/// A node in the persistent trie
///
/// Nodes are immutable once they are reachable from a [`Trie`](super::Trie).
/// Every change goes through [`Clone`], which copies the child map but shares
/// the child nodes and the value with the original.
#[derive(Clone)]
pub enum TrieNode {
    /// A branch point without a value
    Branch {
        /// Children indexed by the next key byte
        children: Children,
    },
    /// A branch point whose key is present in the trie
    Valued {
        /// Children indexed by the next key byte
        children: Children,
        /// The stored value
        value: Value,
    },
}

impl TrieNode {
    /// Create a node with no children and no value
    pub fn new() -> Self {
        TrieNode::Branch {
            children: Children::new(),
        }
    }

    /// Create a node with the given children and no value
    pub fn with_children(children: Children) -> Self {
        TrieNode::Branch { children }
    }

    /// Create a node with the given children carrying `value`
    pub fn with_value<T: Any + Send + Sync>(children: Children, value: T) -> Self {
        TrieNode::Valued {
            children,
            value: Arc::new(value),
        }
    }

    pub(crate) fn with_shared_value(children: Children, value: Value) -> Self {
        TrieNode::Valued { children, value }
    }

    pub fn children(&self) -> &Children {
        match self {
            TrieNode::Branch { children } | TrieNode::Valued { children, .. } => children,
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut Children {
        match self {
            TrieNode::Branch { children } | TrieNode::Valued { children, .. } => children,
        }
    }

    /// Get the child reached by `symbol`
    pub fn child(&self, symbol: u8) -> Option<&Arc<TrieNode>> {
        self.children().get(&symbol)
    }

    /// Check if a key ends at this node
    pub fn has_value(&self) -> bool {
        matches!(self, TrieNode::Valued { .. })
    }

    /// Check if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// The stored value, without a type check
    pub fn value_any(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.shared_value().map(|value| &**value)
    }

    /// The stored value if it is a `T`
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.value_any()?.downcast_ref::<T>()
    }

    pub(crate) fn shared_value(&self) -> Option<&Value> {
        match self {
            TrieNode::Branch { .. } => None,
            TrieNode::Valued { value, .. } => Some(value),
        }
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        TrieNode::new()
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("has_value", &self.has_value())
            .field("children", &self.children().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for TrieNode {
    // Unlink uniquely owned descendants one at a time so a long key path
    // is torn down without recursing once per byte.
    fn drop(&mut self) {
        let mut stack: Vec<Arc<TrieNode>> =
            std::mem::take(self.children_mut()).into_values().collect();
        while let Some(child) = stack.pop() {
            if let Ok(mut node) = Arc::try_unwrap(child) {
                stack.extend(std::mem::take(node.children_mut()).into_values());
            }
        }
    }
}
