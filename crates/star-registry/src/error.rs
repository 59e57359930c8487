//! Error types for the Ledger.

use star_registry_auth::AuthError;
use star_registry_core::CoreError;
use star_registry_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Ledger operations.
///
/// Lookups that find nothing are not errors; they return `None`.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The submission failed ownership verification.
    #[error("ownership verification failed: {0}")]
    Auth(#[from] AuthError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Block body could not be encoded.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The store has no genesis block.
    #[error("ledger is not initialized")]
    NotInitialized,
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
