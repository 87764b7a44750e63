//! Error types for cow_trie

use thiserror::Error;

/// Result type alias for cow_trie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cow_trie operations
///
/// Trie and store reads/writes never fail; a missing key or a type mismatch
/// is reported as `None`. These errors only come from the configuration
/// surface.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
