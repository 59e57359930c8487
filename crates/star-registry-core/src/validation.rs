//! Chain validation: hash recomputation and linkage checks.
//!
//! Validation is an audit, not a gate. Every defect in the chain is
//! collected and returned; nothing short-circuits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::types::BlockHash;

/// A defect found while auditing the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityViolation {
    /// The stored hash no longer matches the block's fields.
    TamperedBlock { height: u64, stored_hash: BlockHash },

    /// `previous_hash` does not match the hash of the preceding block.
    BrokenLink {
        height: u64,
        stored: Option<BlockHash>,
        expected: BlockHash,
    },

    /// The block at this position claims a different height.
    HeightMismatch { position: u64, stored_height: u64 },

    /// The first block is not a well-formed genesis block.
    InvalidGenesis { reason: String },
}

impl IntegrityViolation {
    /// The height of the offending block.
    pub fn height(&self) -> u64 {
        match self {
            Self::TamperedBlock { height, .. } | Self::BrokenLink { height, .. } => *height,
            Self::HeightMismatch { position, .. } => *position,
            Self::InvalidGenesis { .. } => 0,
        }
    }
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TamperedBlock { stored_hash, .. } => {
                write!(f, "Invalid block hash {}", stored_hash)
            }
            Self::BrokenLink {
                stored, expected, ..
            } => match stored {
                Some(stored) => write!(
                    f,
                    "Previous block has invalid hash: {}, expected: {}",
                    stored, expected
                ),
                None => write!(
                    f,
                    "Previous block has invalid hash: null, expected: {}",
                    expected
                ),
            },
            Self::HeightMismatch {
                position,
                stored_height,
            } => write!(
                f,
                "Block at position {} claims height {}",
                position, stored_height
            ),
            Self::InvalidGenesis { reason } => write!(f, "Invalid genesis block: {}", reason),
        }
    }
}

/// Audit a chain of blocks, in ledger order.
///
/// Performs, for every block:
/// - Hash recomputation against the stored hash
/// - Position check (block `i` must have height `i`)
/// - Linkage check against the immediate predecessor (blocks after the first)
///
/// and checks that the first block is a genesis block without a predecessor.
/// Runs in linear time. An empty slice is reported as clean.
pub fn validate_chain(blocks: &[Block]) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    if let Some(first) = blocks.first() {
        if first.previous_hash.is_some() {
            violations.push(IntegrityViolation::InvalidGenesis {
                reason: "previous hash must be empty".into(),
            });
        }
        if !first.is_genesis() {
            violations.push(IntegrityViolation::InvalidGenesis {
                reason: "body is not the genesis marker".into(),
            });
        }
    }

    for (position, block) in blocks.iter().enumerate() {
        let position = position as u64;

        if block.compute_hash() != block.hash {
            violations.push(IntegrityViolation::TamperedBlock {
                height: block.height,
                stored_hash: block.hash,
            });
        }

        if block.height != position {
            violations.push(IntegrityViolation::HeightMismatch {
                position,
                stored_height: block.height,
            });
        }

        if position > 0 {
            let expected = blocks[(position - 1) as usize].hash;
            if block.previous_hash != Some(expected) {
                violations.push(IntegrityViolation::BrokenLink {
                    height: block.height,
                    stored: block.previous_hash,
                    expected,
                });
            }
        }
    }

    violations
}
