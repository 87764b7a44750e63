//! Read guard over a value stored in a snapshot

use crate::store::Version;
use crate::trie::Trie;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A value read from a [`TrieStore`](crate::TrieStore)
///
/// The guard owns a handle to the snapshot the value was read from, so the
/// nodes of that version stay alive for as long as the guard does.
pub struct ValueGuard<T> {
    trie: Trie,
    value: Arc<T>,
    version: Version,
}

impl<T> ValueGuard<T> {
    pub(crate) fn new(trie: Trie, value: Arc<T>, version: Version) -> Self {
        ValueGuard {
            trie,
            value,
            version,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// The snapshot this value was read from
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// The version of the snapshot this value was read from
    pub fn version(&self) -> Version {
        self.version
    }
}

impl<T> Deref for ValueGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueGuard")
            .field("version", &self.version)
            .field("value", &self.value)
            .finish()
    }
}
