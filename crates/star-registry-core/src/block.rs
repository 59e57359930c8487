//! Block: one immutable, hash-identified record of the ledger.
//!
//! A block is linked to its predecessor by `previous_hash`. Its body is kept
//! encoded; callers decode it into a [`BlockBody`] when they need structure.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_header_bytes, decode_body, encode_body};
use crate::error::CoreError;
use crate::types::{BlockHash, WalletAddress};

/// The reserved body of the genesis block.
pub const GENESIS_MARKER: &str = "Genesis Block";

/// A registered entry: arbitrary application data plus its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The submitted payload (for the star registry, a star record).
    pub payload: serde_json::Value,

    /// The wallet address that proved ownership when submitting.
    pub owner: WalletAddress,
}

/// The decoded body of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockBody {
    /// The sentinel body carried only by the block at height 0.
    #[serde(rename = "Genesis Block")]
    Genesis,

    /// An owned entry.
    Entry(Entry),
}

impl BlockBody {
    /// Build an entry body.
    pub fn entry(payload: serde_json::Value, owner: WalletAddress) -> Self {
        Self::Entry(Entry { payload, owner })
    }

    /// Encode to the opaque bytes stored in a block.
    pub fn encode(&self) -> Result<Bytes, CoreError> {
        encode_body(self).map(Bytes::from)
    }

    /// Decode from stored block bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        decode_body(bytes)
    }

    /// Check if this is the genesis marker.
    pub fn is_genesis(&self) -> bool {
        matches!(self, BlockBody::Genesis)
    }
}

/// A ledger block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the ledger (0 for genesis).
    pub height: u64,

    /// Insertion time (Unix seconds), assigned by the ledger.
    pub timestamp: i64,

    /// Hash of the block at `height - 1` (None for genesis).
    pub previous_hash: Option<BlockHash>,

    /// Encoded [`BlockBody`].
    pub body: Bytes,

    /// Blake3 over the canonical encoding of the fields above.
    pub hash: BlockHash,
}

impl Block {
    /// Build a block at the given position and seal it with its hash.
    pub fn link(
        height: u64,
        previous_hash: Option<BlockHash>,
        timestamp: i64,
        body: Bytes,
    ) -> Self {
        let hash = Self::hash_fields(height, timestamp, previous_hash.as_ref(), &body);
        Self {
            height,
            timestamp,
            previous_hash,
            body,
            hash,
        }
    }

    /// Recompute the hash from the block's current fields.
    ///
    /// Equal to `self.hash` unless a field changed after insertion.
    pub fn compute_hash(&self) -> BlockHash {
        Self::hash_fields(
            self.height,
            self.timestamp,
            self.previous_hash.as_ref(),
            &self.body,
        )
    }

    fn hash_fields(
        height: u64,
        timestamp: i64,
        previous_hash: Option<&BlockHash>,
        body: &[u8],
    ) -> BlockHash {
        BlockHash::hash(&canonical_header_bytes(height, timestamp, previous_hash, body))
    }

    /// Decode the body.
    pub fn decode_body(&self) -> Result<BlockBody, CoreError> {
        BlockBody::decode(&self.body)
    }

    /// Check if this block carries the genesis marker.
    pub fn is_genesis(&self) -> bool {
        self.decode_body().map(|b| b.is_genesis()).unwrap_or(false)
    }

    /// The entry carried by this block, if any.
    ///
    /// Returns `None` for the genesis block and for undecodable bodies.
    pub fn entry(&self) -> Option<Entry> {
        match self.decode_body() {
            Ok(BlockBody::Entry(entry)) => Some(entry),
            _ => None,
        }
    }
}
