//! Error types for ownership verification.

use thiserror::Error;

/// Reasons a submission fails ownership verification.
///
/// All variants are recoverable by the caller: request a new challenge and
/// sign it with the key behind the address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The challenge timestamp is outside the freshness window.
    #[error("message signature obsolete or premature: {elapsed}s elapsed, admissible window is {max_window}s")]
    StaleOrPrematureSignature { elapsed: i64, max_window: i64 },

    /// The signature does not verify against the claimed address.
    #[error("message not signed by the owner of the address")]
    InvalidSignature,

    /// The message carries no parseable timestamp.
    #[error("malformed challenge message: {0}")]
    MalformedChallenge(String),
}

/// Result type for verification operations.
pub type Result<T> = std::result::Result<T, AuthError>;
