//! Store configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default label used in log lines
pub const DEFAULT_STORE_NAME: &str = "trie-store";

/// Default number of snapshot slots reserved up front
pub const DEFAULT_SNAPSHOT_CAPACITY: usize = 64;

/// Settings for a [`TrieStore`](crate::TrieStore)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Label for this store in log output
    pub name: String,
    /// Snapshot slots reserved when the store is created
    pub snapshot_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: DEFAULT_STORE_NAME.to_string(),
            snapshot_capacity: DEFAULT_SNAPSHOT_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Parse a config from a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("store name must not be empty".to_string()));
        }
        Ok(())
    }
}
