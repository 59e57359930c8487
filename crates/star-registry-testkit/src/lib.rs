//! # Star Registry Testkit
//!
//! Testing utilities for the Star Registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Deterministic wallets and ready-made ledgers
//! - **Generators**: Proptest strategies for payloads, wallets and whole chains
//!
//! End-to-end scenarios live in this crate's `tests/` directory.
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use star_registry_testkit::fixtures::{memory_ledger, TestWallet};
//!
//! async fn example() {
//!     let ledger = memory_ledger().await;
//!     let wallet = TestWallet::from_seed(1);
//!     let block = wallet
//!         .submit(&ledger, serde_json::json!({"story": "x"}))
//!         .await
//!         .unwrap();
//!     assert_eq!(block.height, 1);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use star_registry_testkit::generators::{chain_from_params, ChainParams};
//!
//! proptest! {
//!     #[test]
//!     fn generated_chains_validate(params: ChainParams) {
//!         let chain = chain_from_params(&params);
//!         prop_assert!(star_registry_core::validate_chain(&chain).is_empty());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{memory_ledger, memory_ledger_with, multi_party_wallets, TestWallet};
pub use generators::{chain_from_params, ChainParams};
