//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the block sequence lock.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// The supplied blocks do not form a sequence starting at height 0.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
