//! In-memory implementation of the Store trait.
//!
//! The block sequence lives for the lifetime of the process. All state sits
//! behind one `RwLock`, so an append is a single critical section.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use star_registry_core::{now_secs, Block, BlockHash};

use crate::error::{Result, StoreError};
use crate::traits::Store;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Blocks in height order.
    blocks: Vec<Block>,

    /// Hash index: stored hash -> height.
    by_hash: HashMap<BlockHash, u64>,

    /// Height of the tail block (None while empty).
    height: Option<u64>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                blocks: Vec::new(),
                by_hash: HashMap::new(),
                height: None,
            }),
        }
    }

    /// Restore a store from a snapshot of blocks.
    ///
    /// Blocks are taken as-is, without hash or linkage checks, so a restored
    /// chain can be audited. Heights must run 0, 1, 2, ...
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        let mut by_hash = HashMap::with_capacity(blocks.len());
        for (position, block) in blocks.iter().enumerate() {
            if block.height != position as u64 {
                return Err(StoreError::InvalidData(format!(
                    "block at position {} has height {}",
                    position, block.height
                )));
            }
            by_hash.entry(block.hash).or_insert(block.height);
        }

        let height = blocks.last().map(|b| b.height);
        Ok(Self {
            inner: RwLock::new(MemoryStoreInner {
                blocks,
                by_hash,
                height,
            }),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn append(&self, body: Bytes) -> Result<Block> {
        let mut inner = self.write()?;

        let height = inner.blocks.len() as u64;
        let tail = inner.blocks.last();
        let previous_hash = tail.map(|b| b.hash);
        // Timestamps never run backwards along the chain, even if the clock does.
        let timestamp = tail.map_or(now_secs(), |b| now_secs().max(b.timestamp));
        let block = Block::link(height, previous_hash, timestamp, body);

        inner.by_hash.insert(block.hash, height);
        inner.blocks.push(block.clone());
        inner.height = Some(height);

        debug!(height, hash = %block.hash, "appended block");
        Ok(block)
    }

    async fn get_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>> {
        let inner = self.read()?;
        Ok(inner
            .by_hash
            .get(hash)
            .and_then(|&height| inner.blocks.get(height as usize))
            .cloned())
    }

    async fn get_by_height(&self, height: u64) -> Result<Option<Block>> {
        let inner = self.read()?;
        Ok(usize::try_from(height)
            .ok()
            .and_then(|idx| inner.blocks.get(idx))
            .cloned())
    }

    async fn height(&self) -> Result<Option<u64>> {
        Ok(self.read()?.height)
    }

    async fn blocks(&self) -> Result<Vec<Block>> {
        Ok(self.read()?.blocks.clone())
    }
}
