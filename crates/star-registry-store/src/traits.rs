//! Store trait: the abstract interface over the block sequence.
//!
//! This trait keeps the ledger storage-agnostic. The only implementation
//! shipped is in-memory; the sequence lives for the lifetime of the process.

use async_trait::async_trait;
use bytes::Bytes;
use star_registry_core::{Block, BlockHash};

use crate::error::Result;

/// The Store trait: async interface for the ordered block sequence.
///
/// # Design Notes
///
/// - **Append is the only write**: implementations assign height and
///   timestamp, link to the current tail, hash and publish the block
///   atomically with respect to every other call on the same store.
/// - **Reads return clones**: callers never hold an alias into stored blocks.
#[async_trait]
pub trait Store: Send + Sync {
    /// Append a block carrying `body`.
    ///
    /// The new block's height is the current length and its previous hash
    /// is the hash of the current tail (None for the first block). The store
    /// stamps the block with the current time, read while the tail is held,
    /// and never earlier than the tail's timestamp.
    async fn append(&self, body: Bytes) -> Result<Block>;

    /// Get a block by hash.
    async fn get_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>>;

    /// Get a block by height.
    async fn get_by_height(&self, height: u64) -> Result<Option<Block>>;

    /// Height of the tail block, or None while the store is empty.
    async fn height(&self) -> Result<Option<u64>>;

    /// Snapshot of every block, in height order.
    async fn blocks(&self) -> Result<Vec<Block>>;
}
