//! # Star Registry Core
//!
//! Pure primitives for the Star Registry: blocks, hash linkage, wallet
//! addresses and chain validation.
//!
//! This crate contains no I/O, no storage, no networking. Apart from
//! [`now_secs`] reading the system clock, it is pure computation over
//! cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Block`] - One immutable, hash-identified record of the ledger
//! - [`BlockBody`] - The decoded body: the genesis marker or an owned entry
//! - [`BlockHash`] - Blake3 hash of a block's canonical header
//! - [`WalletAddress`] - An address that commits to an Ed25519 public key
//! - [`IntegrityViolation`] - A defect reported by [`validate_chain`]
//!
//! ## Canonicalization
//!
//! Block hashes are computed over deterministic CBOR. See [`canonical`] module.

pub mod block;
pub mod canonical;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod types;
pub mod validation;

pub use block::{Block, BlockBody, Entry, GENESIS_MARKER};
pub use canonical::canonical_header_bytes;
pub use clock::now_secs;
pub use crypto::{Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::CoreError;
pub use types::{BlockHash, WalletAddress};
pub use validation::{validate_chain, IntegrityViolation};
