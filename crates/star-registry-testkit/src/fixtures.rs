//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use serde_json::Value;

use star_registry::{Block, Ledger, LedgerConfig};
use star_registry_auth::OwnershipVerifier;
use star_registry_core::{Ed25519PublicKey, Keypair, WalletAddress};
use star_registry_store::{MemoryStore, Store};

/// A wallet: keypair plus the address derived from it.
#[derive(Debug, Clone)]
pub struct TestWallet {
    pub keypair: Keypair,
    pub address: WalletAddress,
}

impl TestWallet {
    /// Create a wallet with a random keypair.
    pub fn new() -> Self {
        Self::from_keypair(Keypair::generate())
    }

    /// Create a deterministic wallet whose seed is `seed` repeated.
    pub fn from_seed(seed: u8) -> Self {
        Self::with_seed([seed; 32])
    }

    /// Create a deterministic wallet from a full 32-byte seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::from_keypair(Keypair::from_seed(&seed))
    }

    fn from_keypair(keypair: Keypair) -> Self {
        let address = WalletAddress::derive(&keypair.public_key());
        Self { keypair, address }
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Sign `message`, returning the hex signature a client would submit.
    pub fn sign(&self, message: &str) -> String {
        self.keypair.sign(message.as_bytes()).to_hex()
    }

    /// A challenge for this wallet issued at `issued_at`, and its signature.
    pub fn signed_challenge_at(&self, issued_at: i64) -> (String, String) {
        let message = OwnershipVerifier::default().issue_challenge_at(&self.address, issued_at);
        let signature = self.sign(&message);
        (message, signature)
    }

    /// Request a challenge from `ledger` and sign it.
    pub fn signed_challenge<S: Store>(&self, ledger: &Ledger<S>) -> (String, String) {
        let message = ledger.request_challenge(&self.address);
        let signature = self.sign(&message);
        (message, signature)
    }

    /// Run the full request/sign/submit round against `ledger`.
    pub async fn submit<S: Store>(
        &self,
        ledger: &Ledger<S>,
        payload: Value,
    ) -> star_registry::Result<Block> {
        let (message, signature) = self.signed_challenge(ledger);
        ledger
            .submit_entry(&self.address, &message, &signature, payload)
            .await
    }
}

impl Default for TestWallet {
    fn default() -> Self {
        Self::new()
    }
}

/// Create distinct deterministic wallets for multi-party tests.
pub fn multi_party_wallets(count: usize) -> Vec<TestWallet> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            TestWallet::with_seed(seed)
        })
        .collect()
}

/// A fresh in-memory ledger with the default configuration.
pub async fn memory_ledger() -> Ledger<MemoryStore> {
    memory_ledger_with(LedgerConfig::default()).await
}

/// A fresh in-memory ledger with `config`.
///
/// # Panics
///
/// If the genesis block cannot be created, which a new `MemoryStore` never
/// refuses.
pub async fn memory_ledger_with(config: LedgerConfig) -> Ledger<MemoryStore> {
    Ledger::new(MemoryStore::new(), config)
        .await
        .expect("a new memory store accepts the genesis block")
}
