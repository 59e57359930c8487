//! End-to-end ledger scenarios.
//!
//! Each test drives the public `Ledger` API the way a client would:
//! request a challenge, sign it, submit, then query and audit.

use std::sync::Arc;

use serde_json::json;

use star_registry::auth::{now_secs, AuthError};
use star_registry::store::MemoryStore;
use star_registry::{BlockBody, IntegrityViolation, Ledger, LedgerConfig, LedgerError};
use star_registry_testkit::{memory_ledger, memory_ledger_with, multi_party_wallets, TestWallet};

#[tokio::test]
async fn test_register_single_star() {
    let ledger = memory_ledger().await;
    let wallet = TestWallet::from_seed(0xA);

    let (message, signature) = wallet.signed_challenge(&ledger);
    let block = ledger
        .submit_entry(&wallet.address, &message, &signature, json!({"note": "x"}))
        .await
        .unwrap();

    assert_eq!(ledger.get_height().await.unwrap(), 1);
    assert_eq!(block.height, 1);

    let genesis = ledger.get_by_height(0).await.unwrap().unwrap();
    let stored = ledger.get_by_height(1).await.unwrap().unwrap();
    assert_eq!(stored, block);
    assert_eq!(stored.previous_hash, Some(genesis.hash));

    assert_eq!(
        ledger.get_entries_by_owner(&wallet.address).await.unwrap(),
        vec![json!({"note": "x"})]
    );
    assert!(ledger.validate().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sequential_submissions_link() {
    let ledger = memory_ledger().await;
    let wallets = multi_party_wallets(3);

    for n in 0..9 {
        let wallet = &wallets[n % wallets.len()];
        wallet.submit(&ledger, json!({ "star": n })).await.unwrap();
    }

    assert_eq!(ledger.get_height().await.unwrap(), 9);
    let blocks = ledger.blocks().await.unwrap();
    for pair in blocks.windows(2) {
        assert_eq!(pair[1].height, pair[0].height + 1);
        assert_eq!(pair[1].previous_hash, Some(pair[0].hash));
        assert!(pair[1].timestamp >= pair[0].timestamp);
    }

    assert_eq!(
        ledger.get_entries_by_owner(&wallets[1].address).await.unwrap(),
        vec![json!({"star": 1}), json!({"star": 4}), json!({"star": 7})]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_form_one_chain() {
    let ledger = Arc::new(memory_ledger().await);
    let wallets = multi_party_wallets(32);

    let mut handles = Vec::new();
    for (i, wallet) in wallets.iter().cloned().enumerate() {
        let ledger = Arc::clone(&ledger);
        handles.push(tokio::spawn(async move {
            wallet.submit(&ledger, json!({ "task": i })).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(ledger.get_height().await.unwrap(), 32);
    let blocks = ledger.blocks().await.unwrap();
    for (position, block) in blocks.iter().enumerate() {
        assert_eq!(block.height, position as u64);
    }
    assert!(ledger.validate().await.unwrap().is_empty());

    for (i, wallet) in wallets.iter().enumerate() {
        assert_eq!(
            ledger.get_entries_by_owner(&wallet.address).await.unwrap(),
            vec![json!({ "task": i })]
        );
    }
}

#[tokio::test]
async fn test_rejections_leave_chain_intact() {
    let ledger = memory_ledger().await;
    let owner = TestWallet::from_seed(1);
    let impostor = TestWallet::from_seed(2);

    owner.submit(&ledger, json!({"n": 1})).await.unwrap();

    // Wrong signer.
    let (message, _) = owner.signed_challenge(&ledger);
    let err = ledger
        .submit_entry(&owner.address, &message, &impostor.sign(&message), json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Auth(AuthError::InvalidSignature)));

    // Garbage signature.
    let err = ledger
        .submit_entry(&owner.address, &message, "zz", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Auth(AuthError::InvalidSignature)));

    // Expired challenge.
    let (message, signature) = owner.signed_challenge_at(now_secs() - 3_600);
    let err = ledger
        .submit_entry(&owner.address, &message, &signature, json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Auth(AuthError::StaleOrPrematureSignature { .. })
    ));

    // Challenge from the future.
    let (message, signature) = owner.signed_challenge_at(now_secs() + 3_600);
    let err = ledger
        .submit_entry(&owner.address, &message, &signature, json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Auth(AuthError::StaleOrPrematureSignature { .. })
    ));

    assert_eq!(ledger.get_height().await.unwrap(), 1);
    owner.submit(&ledger, json!({"n": 2})).await.unwrap();
    assert_eq!(ledger.get_height().await.unwrap(), 2);
    assert!(ledger.validate().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_freshness_window() {
    let ledger = memory_ledger_with(LedgerConfig { max_window_secs: 60 }).await;
    let wallet = TestWallet::from_seed(1);

    let (message, signature) = wallet.signed_challenge_at(now_secs() - 30);
    ledger
        .submit_entry(&wallet.address, &message, &signature, json!({"ok": true}))
        .await
        .unwrap();

    let (message, signature) = wallet.signed_challenge_at(now_secs() - 120);
    let err = ledger
        .submit_entry(&wallet.address, &message, &signature, json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Auth(AuthError::StaleOrPrematureSignature { max_window: 60, .. })
    ));
    assert_eq!(ledger.get_height().await.unwrap(), 1);
}

#[tokio::test]
async fn test_block_timestamps_follow_height() {
    let ledger = memory_ledger().await;
    let wallet = TestWallet::from_seed(1);
    let before = now_secs();

    wallet.submit(&ledger, json!({"n": 1})).await.unwrap();
    // An old-but-fresh challenge does not carry its time into the block.
    let (message, signature) = wallet.signed_challenge_at(now_secs() - 200);
    let block = ledger
        .submit_entry(&wallet.address, &message, &signature, json!({"n": 2}))
        .await
        .unwrap();
    assert!(block.timestamp >= before);

    let blocks = ledger.blocks().await.unwrap();
    for pair in blocks.windows(2) {
        assert!(
            pair[1].timestamp >= pair[0].timestamp,
            "block {} stamped before block {}",
            pair[1].height,
            pair[0].height
        );
    }
}

#[tokio::test]
async fn test_embedded_address_is_not_compared() {
    // Only the timestamp and the signature are checked: a message naming
    // another address is still accepted when the submitter signed it.
    let ledger = memory_ledger().await;
    let owner = TestWallet::from_seed(1);
    let other = TestWallet::from_seed(2);

    let (message, signature) = {
        let message = ledger.request_challenge(&other.address);
        let signature = owner.sign(&message);
        (message, signature)
    };
    let block = ledger
        .submit_entry(&owner.address, &message, &signature, json!({"n": 1}))
        .await
        .unwrap();

    assert_eq!(block.entry().unwrap().owner, owner.address);
    assert!(ledger
        .get_entries_by_owner(&other.address)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_tampered_snapshot_is_reported() {
    let ledger = memory_ledger().await;
    let wallet = TestWallet::from_seed(1);
    for n in 0..4 {
        wallet.submit(&ledger, json!({ "n": n })).await.unwrap();
    }

    // Rewrite one payload in place without resealing the block.
    let mut blocks = ledger.blocks().await.unwrap();
    let stored = blocks[2].hash;
    let mut entry = blocks[2].entry().unwrap();
    entry.payload = json!({"n": "forged"});
    blocks[2].body = BlockBody::Entry(entry).encode().unwrap();

    let audited = Ledger::new(
        MemoryStore::from_blocks(blocks).unwrap(),
        LedgerConfig::default(),
    )
    .await
    .unwrap();
    let violations = audited.validate().await.unwrap();

    assert_eq!(
        violations,
        vec![IntegrityViolation::TamperedBlock {
            height: 2,
            stored_hash: stored
        }]
    );
    assert_eq!(
        violations[0].to_string(),
        format!("Invalid block hash {}", stored.to_hex())
    );
}

#[tokio::test]
async fn test_rewired_link_is_reported() {
    let ledger = memory_ledger().await;
    let wallet = TestWallet::from_seed(1);
    for n in 0..3 {
        wallet.submit(&ledger, json!({ "n": n })).await.unwrap();
    }

    let mut blocks = ledger.blocks().await.unwrap();
    let expected = blocks[2].hash;
    blocks[3].previous_hash = Some(blocks[1].hash);

    let audited = Ledger::new(
        MemoryStore::from_blocks(blocks).unwrap(),
        LedgerConfig::default(),
    )
    .await
    .unwrap();
    let violations = audited.validate().await.unwrap();

    assert!(violations
        .iter()
        .any(|v| matches!(v, IntegrityViolation::TamperedBlock { height: 3, .. })));
    assert!(violations.iter().any(|v| matches!(
        v,
        IntegrityViolation::BrokenLink { height: 3, expected: e, .. } if *e == expected
    )));
}
