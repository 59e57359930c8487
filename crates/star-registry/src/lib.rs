//! # Star Registry
//!
//! The unified API for the Star Registry - a single-node, append-only ledger
//! whose writes are gated by proof of wallet ownership.
//!
//! ## Overview
//!
//! - **Blocks**: Immutable records, each linked to its predecessor by hash
//! - **Ownership**: Writers sign a time-stamped challenge with their wallet key
//! - **Queries**: Lookup by hash, by height, and by owner
//! - **Validation**: A full audit reporting every tampered or broken link
//!
//! ## Key Concepts
//!
//! - **Genesis**: The ledger's first block, created automatically.
//! - **Challenge**: `<address>:<unix seconds>:starRegistry`, valid for the
//!   freshness window (300 seconds by default).
//! - **Entry**: A submitted payload together with the owner address.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use star_registry::{Keypair, Ledger, LedgerConfig, WalletAddress};
//! use star_registry::store::MemoryStore;
//!
//! async fn example() {
//!     let ledger = Ledger::new(MemoryStore::new(), LedgerConfig::default())
//!         .await
//!         .unwrap();
//!
//!     // The wallet side: request, sign, submit
//!     let keypair = Keypair::generate();
//!     let address = WalletAddress::derive(&keypair.public_key());
//!     let message = ledger.request_challenge(&address);
//!     let signature = keypair.sign(message.as_bytes()).to_hex();
//!
//!     let block = ledger
//!         .submit_entry(&address, &message, &signature, serde_json::json!({"story": "x"}))
//!         .await
//!         .unwrap();
//!     assert_eq!(block.height, 1);
//!
//!     assert!(ledger.validate().await.unwrap().is_empty());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `star_registry::core` - Core primitives (Block, BlockHash, etc.)
//! - `star_registry::store` - Storage abstraction
//! - `star_registry::auth` - Challenges and ownership verification

pub mod error;
pub mod ledger;

// Re-export component crates
pub use star_registry_auth as auth;
pub use star_registry_core as core;
pub use star_registry_store as store;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig};

// Re-export commonly used types
pub use star_registry_auth::{AuthError, OwnershipVerifier};
pub use star_registry_core::{
    Block, BlockBody, BlockHash, Entry, IntegrityViolation, Keypair, WalletAddress,
};
