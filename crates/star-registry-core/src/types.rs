//! Strong type definitions for the Star Registry.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::Ed25519PublicKey;
use crate::error::CoreError;

/// A 32-byte block hash, computed as Blake3(canonical_header_bytes(block)).
///
/// Hashes are unique by construction: every block commits to its height and
/// to the hash of its predecessor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create a new BlockHash from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

/// Full lowercase hex, so the rendered hash can be fed back into lookups.
impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for BlockHash {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into()?;
        Ok(Self(arr))
    }
}

/// Prefix shared by every wallet address.
pub const ADDRESS_PREFIX: &str = "star_";

/// Hex characters for the encoded public key (32 bytes).
const PUBKEY_HEX_LEN: usize = 64;

/// Bytes of Blake3(public_key) appended as a checksum.
const CHECKSUM_LEN: usize = 4;

/// A wallet address.
///
/// Format: `star_` + hex(public_key) + hex(Blake3(public_key)[..4]).
///
/// The address commits to the owner's Ed25519 public key, so a signature can
/// be checked against the address alone. Constructing a `WalletAddress` from
/// a string does not validate it; [`WalletAddress::public_key`] does.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Wrap an address string without validating it.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Derive the address that commits to `public_key`.
    pub fn derive(public_key: &Ed25519PublicKey) -> Self {
        let checksum = blake3::hash(public_key.as_bytes());
        Self(format!(
            "{}{}{}",
            ADDRESS_PREFIX,
            public_key.to_hex(),
            hex::encode(&checksum.as_bytes()[..CHECKSUM_LEN])
        ))
    }

    /// Extract the public key, verifying prefix, length and checksum.
    pub fn public_key(&self) -> Result<Ed25519PublicKey, CoreError> {
        let encoded = self
            .0
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or_else(|| CoreError::InvalidAddress(format!("missing {ADDRESS_PREFIX} prefix")))?;

        if encoded.len() != PUBKEY_HEX_LEN + CHECKSUM_LEN * 2 {
            return Err(CoreError::InvalidAddress(format!(
                "expected {} characters after prefix, got {}",
                PUBKEY_HEX_LEN + CHECKSUM_LEN * 2,
                encoded.len()
            )));
        }

        let (key_hex, checksum_hex) = encoded.split_at(PUBKEY_HEX_LEN);
        let public_key = Ed25519PublicKey::from_hex(key_hex)
            .map_err(|e| CoreError::InvalidAddress(e.to_string()))?;
        let checksum =
            hex::decode(checksum_hex).map_err(|e| CoreError::InvalidAddress(e.to_string()))?;

        let expected = blake3::hash(public_key.as_bytes());
        if checksum != expected.as_bytes()[..CHECKSUM_LEN] {
            return Err(CoreError::InvalidAddress("checksum mismatch".into()));
        }

        Ok(public_key)
    }

    /// Check that the address is well-formed and its checksum is correct.
    pub fn is_valid(&self) -> bool {
        self.public_key().is_ok()
    }

    /// Borrow the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", self.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}
