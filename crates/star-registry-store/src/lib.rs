//! # Star Registry Store
//!
//! Storage abstraction for the Star Registry. Provides a trait-based
//! interface over the ordered block sequence, with an in-memory
//! implementation.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`MemoryStore`] - Process-lifetime storage behind a single `RwLock`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use star_registry_core::BlockBody;
//! use star_registry_store::{MemoryStore, Store};
//!
//! async fn example() {
//!     let store = MemoryStore::new();
//!
//!     let body = BlockBody::Genesis.encode().unwrap();
//!     let genesis = store.append(body).await.unwrap();
//!     assert_eq!(genesis.height, 0);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Serialized appends**: height and timestamp assignment, linkage,
//!   hashing and the height counter update happen in one critical section
//! - **No torn reads**: readers see the sequence before or after an append
//! - **Append-only**: there is no update or delete operation

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use traits::Store;
