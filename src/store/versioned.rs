//! Thread-safe store of trie snapshots
//!
//! Concurrency layout:
//! - `writer` serializes `put`/`remove`; the new trie is built while only this
//!   lock is held, so readers are never blocked by a rebuild.
//! - `snapshots` is held for writing only while a finished trie is pushed,
//!   and for reading only while a snapshot handle is cloned out.

use crate::config::StoreConfig;
use crate::store::ValueGuard;
use crate::trie::Trie;
use log::{debug, trace};
use parking_lot::{Mutex, RwLock};
use std::any::Any;

/// Index of a snapshot in a [`TrieStore`]. Version 0 is the empty trie.
pub type Version = usize;

/// A versioned wrapper around [`Trie`]
///
/// Every successful write appends one snapshot. Old snapshots are kept for
/// the lifetime of the store and stay readable at their version number.
pub struct TrieStore {
    config: StoreConfig,
    /// Orders all writes; held for the whole of `put`/`remove`
    writer: Mutex<()>,
    /// All versions, indexed by version number; never empty
    snapshots: RwLock<Vec<Trie>>,
}

impl TrieStore {
    /// Create a store with default settings
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store from `config`
    pub fn with_config(config: StoreConfig) -> Self {
        let mut snapshots = Vec::with_capacity(config.snapshot_capacity.max(1));
        snapshots.push(Trie::new());
        TrieStore {
            config,
            writer: Mutex::new(()),
            snapshots: RwLock::new(snapshots),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The newest version number
    pub fn get_version(&self) -> Version {
        self.snapshots.read().len() - 1
    }

    /// Number of versions, including the initial empty one
    pub fn version_count(&self) -> usize {
        self.snapshots.read().len()
    }

    /// The snapshot at `version`, if it exists
    pub fn snapshot(&self, version: Version) -> Option<Trie> {
        self.snapshots.read().get(version).cloned()
    }

    /// The newest snapshot
    pub fn latest(&self) -> Trie {
        self.snapshots
            .read()
            .last()
            .cloned()
            .expect("store always holds version 0")
    }

    /// Get the value under `key` in the newest version
    ///
    /// The version is fixed before the lookup starts, so a write that lands
    /// meanwhile does not change what this call reads.
    pub fn get<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>) -> Option<ValueGuard<T>> {
        let version = self.get_version();
        self.get_at(key, version)
    }

    /// Get the value under `key` in `version`
    ///
    /// Returns `None` if the version does not exist, the key is missing, or
    /// the stored value is not a `T`.
    pub fn get_at<T: Any + Send + Sync>(
        &self,
        key: impl AsRef<[u8]>,
        version: Version,
    ) -> Option<ValueGuard<T>> {
        let Some(trie) = self.snapshot(version) else {
            trace!(
                "{}: read of unknown version {} (latest is {})",
                self.config.name,
                version,
                self.get_version()
            );
            return None;
        };

        let value = trie.get_shared::<T>(key.as_ref())?;
        Some(ValueGuard::new(trie, value, version))
    }

    /// Map `key` to `value` and return the new version number
    pub fn put<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>, value: T) -> Version {
        let _writer = self.writer.lock();
        let next = self.latest().put(key, value);
        self.publish(next, "put")
    }

    /// Remove `key` and return the resulting version number
    ///
    /// Removing an absent key publishes nothing and returns the current
    /// version.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Version {
        let _writer = self.writer.lock();
        let current = self.latest();
        let next = current.remove(key);
        if next == current {
            let version = self.get_version();
            trace!(
                "{}: remove of absent key, staying at version {}",
                self.config.name,
                version
            );
            return version;
        }
        self.publish(next, "remove")
    }

    /// Append a finished snapshot. Must be called with `writer` held.
    fn publish(&self, trie: Trie, op: &str) -> Version {
        let version = {
            let mut snapshots = self.snapshots.write();
            snapshots.push(trie);
            snapshots.len() - 1
        };
        debug!("{}: {} published version {}", self.config.name, op, version);
        version
    }
}

impl Default for TrieStore {
    fn default() -> Self {
        TrieStore::new()
    }
}
