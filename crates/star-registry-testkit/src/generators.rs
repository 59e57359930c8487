//! Proptest generators for property-based testing.

use bytes::Bytes;
use proptest::prelude::*;
use serde_json::{Map, Value};

use star_registry_core::{
    Block, BlockBody, BlockHash, Ed25519PublicKey, Keypair, WalletAddress,
};

use crate::fixtures::TestWallet;

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random wallet.
pub fn wallet() -> impl Strategy<Value = TestWallet> {
    any::<[u8; 32]>().prop_map(TestWallet::with_seed)
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a random well-formed wallet address.
pub fn address() -> impl Strategy<Value = WalletAddress> {
    public_key().prop_map(|pk| WalletAddress::derive(&pk))
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a plausible Unix timestamp in seconds.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_000_000_000i64
}

/// Generate an arbitrary JSON value without floats.
///
/// Floats are left out so decoded payloads compare equal to the originals.
pub fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Generate a star record: coordinates plus a free-form story.
pub fn star_payload() -> impl Strategy<Value = Value> {
    ("[0-9]{1,3}", "[0-9]{1,3}", "[a-zA-Z ]{0,32}").prop_map(|(dec, ra, story)| {
        serde_json::json!({ "dec": dec, "ra": ra, "story": story })
    })
}

/// Parameters for generating a chain of blocks.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub genesis_timestamp: i64,
    pub entries: Vec<(TestWallet, Value, i64)>,
}

impl Arbitrary for ChainParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            timestamp(),
            prop::collection::vec((wallet(), star_payload(), 0i64..=3_600), 0..8),
        )
            .prop_map(|(genesis_timestamp, steps)| {
                let mut ts = genesis_timestamp;
                let entries = steps
                    .into_iter()
                    .map(|(wallet, payload, gap)| {
                        ts += gap;
                        (wallet, payload, ts)
                    })
                    .collect();
                ChainParams {
                    genesis_timestamp,
                    entries,
                }
            })
            .boxed()
    }
}

/// Build a correctly linked chain from parameters, genesis first.
pub fn chain_from_params(params: &ChainParams) -> Vec<Block> {
    let genesis = Block::link(
        0,
        None,
        params.genesis_timestamp,
        encode(&BlockBody::Genesis),
    );

    let mut chain = vec![genesis];
    for (wallet, payload, ts) in &params.entries {
        let tail = &chain[chain.len() - 1];
        let body = BlockBody::entry(payload.clone(), wallet.address.clone());
        let block = Block::link(tail.height + 1, Some(tail.hash), *ts, encode(&body));
        chain.push(block);
    }
    chain
}

fn encode(body: &BlockBody) -> Bytes {
    body.encode().expect("generated bodies always encode")
}
