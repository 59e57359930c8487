//! # Star Registry Auth
//!
//! Proof of wallet ownership for writes to the registry.
//!
//! ## Overview
//!
//! Before submitting an entry, a caller asks for a challenge message bound to
//! its wallet address and the current time, signs it with the wallet key and
//! submits address, message and signature together. The verifier then checks:
//!
//! 1. **Freshness**: the timestamp embedded in the message is neither older
//!    than the window (300 seconds by default) nor in the future
//! 2. **Ownership**: the signature verifies over the message against the
//!    public key the address commits to
//!
//! ## Known Limitation
//!
//! There is no server-side challenge registry. Any well-formed message with
//! a fresh timestamp and a valid signature is accepted, including messages
//! the registry never issued and messages already used once. The address
//! embedded in the message is not compared with the submitting address.
//!
//! ## Usage
//!
//! ```rust
//! use star_registry_auth::OwnershipVerifier;
//! use star_registry_core::{Keypair, WalletAddress};
//!
//! let keypair = Keypair::generate();
//! let address = WalletAddress::derive(&keypair.public_key());
//!
//! let verifier = OwnershipVerifier::default();
//! let message = verifier.issue_challenge(&address);
//! let signature = keypair.sign(message.as_bytes()).to_hex();
//!
//! assert!(verifier.verify(&address, &message, &signature).is_ok());
//! ```

pub mod challenge;
pub mod error;
pub mod verifier;

pub use challenge::{Challenge, CHALLENGE_SUFFIX};
pub use error::{AuthError, Result};
pub use star_registry_core::now_secs;
pub use verifier::{OwnershipVerifier, DEFAULT_MAX_WINDOW_SECS};
