//! The Ledger: unified API for the Star Registry.
//!
//! The Ledger brings together storage and ownership verification into a
//! single write path, plus the read paths and the chain audit.

use serde_json::Value;
use tracing::{debug, info, warn};

use star_registry_auth::{now_secs, OwnershipVerifier, DEFAULT_MAX_WINDOW_SECS};
use star_registry_core::{
    validate_chain, Block, BlockBody, BlockHash, IntegrityViolation, WalletAddress,
};
use star_registry_store::Store;

use crate::error::{LedgerError, Result};

/// Configuration for the Ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Maximum age of a challenge message at submission time, in seconds.
    pub max_window_secs: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_window_secs: DEFAULT_MAX_WINDOW_SECS,
        }
    }
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Issuing ownership challenges
/// - Submitting owned entries
/// - Querying blocks and entries
/// - Auditing the chain
///
/// All writes go through [`Store::append`], which serializes them; the
/// Ledger itself holds no mutable state and can be shared behind an `Arc`.
pub struct Ledger<S: Store> {
    /// The storage backend.
    store: S,
    /// Challenge issuer and signature checker.
    verifier: OwnershipVerifier,
    /// Configuration.
    config: LedgerConfig,
}

impl<S: Store> Ledger<S> {
    /// Create a ledger over `store`, creating the genesis block if the store
    /// is empty.
    pub async fn new(store: S, config: LedgerConfig) -> Result<Self> {
        let ledger = Self {
            store,
            verifier: OwnershipVerifier::new(config.max_window_secs),
            config,
        };
        ledger.initialize().await?;
        Ok(ledger)
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Get the verifier.
    pub fn verifier(&self) -> &OwnershipVerifier {
        &self.verifier
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn initialize(&self) -> Result<()> {
        match self.store.height().await? {
            None => {
                let genesis = self.append(&BlockBody::Genesis).await?;
                info!(hash = %genesis.hash, "created genesis block");
            }
            Some(height) => {
                debug!(height, "ledger opened over existing blocks");
            }
        }
        Ok(())
    }

    /// Encode `body` and append it. Nothing is written if encoding fails.
    ///
    /// The store assigns the block's timestamp.
    async fn append(&self, body: &BlockBody) -> Result<Block> {
        let encoded = body.encode()?;
        Ok(self.store.append(encoded).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a challenge message for `address` to sign.
    pub fn request_challenge(&self, address: &WalletAddress) -> String {
        self.verifier.issue_challenge(address)
    }

    /// Submit an entry owned by `address`.
    ///
    /// `message` must be a fresh challenge and `signature` its hex-encoded
    /// Ed25519 signature by the key behind `address`. On rejection the
    /// ledger is left untouched.
    pub async fn submit_entry(
        &self,
        address: &WalletAddress,
        message: &str,
        signature: &str,
        payload: Value,
    ) -> Result<Block> {
        self.submit_entry_verified_at(address, message, signature, payload, now_secs())
            .await
    }

    /// Submit an entry, checking challenge freshness as of `now`.
    async fn submit_entry_verified_at(
        &self,
        address: &WalletAddress,
        message: &str,
        signature: &str,
        payload: Value,
        now: i64,
    ) -> Result<Block> {
        if let Err(e) = self.verifier.verify_at(address, message, signature, now) {
            warn!(%address, error = %e, "rejected submission");
            return Err(e.into());
        }

        let body = BlockBody::entry(payload, address.clone());
        let block = self.append(&body).await?;
        info!(%address, height = block.height, hash = %block.hash, "registered entry");
        Ok(block)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Height of the newest block (0 when only genesis exists).
    pub async fn get_height(&self) -> Result<u64> {
        self.store.height().await?.ok_or(LedgerError::NotInitialized)
    }

    /// Get a block by hash.
    pub async fn get_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>> {
        Ok(self.store.get_by_hash(hash).await?)
    }

    /// Get a block by height.
    pub async fn get_by_height(&self, height: u64) -> Result<Option<Block>> {
        Ok(self.store.get_by_height(height).await?)
    }

    /// Payloads of every entry owned by `address`, in ledger order.
    ///
    /// The genesis block is never included. Bodies that no longer decode are
    /// skipped; [`Ledger::validate`] reports them.
    pub async fn get_entries_by_owner(&self, address: &WalletAddress) -> Result<Vec<Value>> {
        let blocks = self.store.blocks().await?;

        let mut payloads = Vec::new();
        for block in blocks.iter().filter(|b| b.height > 0) {
            match block.decode_body() {
                Ok(BlockBody::Entry(entry)) if entry.owner == *address => {
                    payloads.push(entry.payload)
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(height = block.height, error = %e, "skipping undecodable block body")
                }
            }
        }
        Ok(payloads)
    }

    /// Snapshot of every block, in height order.
    pub async fn blocks(&self) -> Result<Vec<Block>> {
        Ok(self.store.blocks().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Audit the whole chain. An empty list means the chain verified clean.
    pub async fn validate(&self) -> Result<Vec<IntegrityViolation>> {
        let blocks = self.store.blocks().await?;
        let violations = validate_chain(&blocks);

        if violations.is_empty() {
            debug!(blocks = blocks.len(), "chain validated clean");
        } else {
            for violation in &violations {
                warn!(height = violation.height(), "{}", violation);
            }
        }
        Ok(violations)
    }
}
