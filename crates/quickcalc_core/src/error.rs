//! Error types for the persistence boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached (private browsing, no window).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write key `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}
