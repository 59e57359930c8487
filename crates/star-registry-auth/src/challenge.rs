//! Challenge messages.
//!
//! Format: `<address>:<unix seconds>:starRegistry`.

use std::fmt;

use star_registry_core::WalletAddress;

use crate::error::{AuthError, Result};

/// Trailing field of every challenge message.
pub const CHALLENGE_SUFFIX: &str = "starRegistry";

/// A parsed challenge message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// The address the challenge was issued for (first field).
    pub address: String,

    /// When the challenge was issued (second field, Unix seconds).
    pub issued_at: i64,
}

impl Challenge {
    /// Create a challenge for `address` issued at `issued_at`.
    pub fn new(address: &WalletAddress, issued_at: i64) -> Self {
        Self {
            address: address.as_str().to_string(),
            issued_at,
        }
    }

    /// Parse a message.
    ///
    /// Only the first two colon-delimited fields are interpreted; the suffix
    /// is not checked. The timestamp must be plain decimal digits with an
    /// optional leading `-`, the only form [`Challenge::to_message`] renders.
    pub fn parse(message: &str) -> Result<Self> {
        let mut fields = message.split(':');
        let address = fields.next().unwrap_or_default().to_string();
        let raw = fields
            .next()
            .ok_or_else(|| AuthError::MalformedChallenge("missing timestamp field".into()))?;
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::MalformedChallenge(format!("invalid timestamp {raw:?}")));
        }
        let issued_at = raw
            .parse::<i64>()
            .map_err(|_| AuthError::MalformedChallenge(format!("timestamp out of range {raw:?}")))?;

        Ok(Self { address, issued_at })
    }

    /// Render the message a wallet has to sign.
    pub fn to_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.address, self.issued_at, CHALLENGE_SUFFIX)
    }
}
