//! Ownership verification: freshness window plus signature check.

use tracing::debug;

use star_registry_core::{now_secs, Ed25519Signature, WalletAddress};

use crate::challenge::Challenge;
use crate::error::{AuthError, Result};

/// Default freshness window: five minutes.
pub const DEFAULT_MAX_WINDOW_SECS: i64 = 300;

/// Issues challenge messages and verifies signed submissions.
///
/// Stateless: challenges are not recorded, so freshness is re-derived from
/// the timestamp embedded in the message at verification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipVerifier {
    max_window_secs: i64,
}

impl OwnershipVerifier {
    /// Create a verifier with the given freshness window.
    pub fn new(max_window_secs: i64) -> Self {
        Self { max_window_secs }
    }

    /// The freshness window, in seconds.
    pub fn max_window_secs(&self) -> i64 {
        self.max_window_secs
    }

    /// Issue a challenge message for `address`, stamped with the current time.
    pub fn issue_challenge(&self, address: &WalletAddress) -> String {
        self.issue_challenge_at(address, now_secs())
    }

    /// Issue a challenge message stamped with `now`.
    pub fn issue_challenge_at(&self, address: &WalletAddress, now: i64) -> String {
        Challenge::new(address, now).to_message()
    }

    /// Verify a signed challenge against the current time.
    pub fn verify(&self, address: &WalletAddress, message: &str, signature: &str) -> Result<()> {
        self.verify_at(address, message, signature, now_secs())
    }

    /// Verify a signed challenge as of `now`.
    ///
    /// Steps, in order:
    /// 1. Parse the timestamp out of the message
    /// 2. Check it against the freshness window
    /// 3. Verify `signature` (hex) over the message bytes with the public key
    ///    `address` commits to
    pub fn verify_at(
        &self,
        address: &WalletAddress,
        message: &str,
        signature: &str,
        now: i64,
    ) -> Result<()> {
        let challenge = Challenge::parse(message)?;
        self.check_freshness(challenge.issued_at, now)?;

        let public_key = address.public_key().map_err(|e| {
            debug!(%address, error = %e, "address does not decode to a public key");
            AuthError::InvalidSignature
        })?;

        let signature = Ed25519Signature::from_hex(signature.trim()).map_err(|e| {
            debug!(%address, error = %e, "signature is not 64 hex-encoded bytes");
            AuthError::InvalidSignature
        })?;

        public_key
            .verify(message.as_bytes(), &signature)
            .map_err(|_| AuthError::InvalidSignature)
    }

    /// Check a challenge timestamp against the freshness window.
    ///
    /// Accepts `0 <= now - issued_at <= max_window_secs`. Older challenges are
    /// stale and challenges from the future are premature.
    pub fn check_freshness(&self, issued_at: i64, now: i64) -> Result<()> {
        let elapsed = now.saturating_sub(issued_at);
        if elapsed < 0 || elapsed > self.max_window_secs {
            return Err(AuthError::StaleOrPrematureSignature {
                elapsed,
                max_window: self.max_window_secs,
            });
        }
        Ok(())
    }
}

impl Default for OwnershipVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WINDOW_SECS)
    }
}
