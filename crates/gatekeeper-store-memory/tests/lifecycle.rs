//! End-to-end token lifecycle against the in-memory deny list.

use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use gatekeeper::prelude::*;
use gatekeeper_store_memory::MemoryTokenStore;

fn key_material() -> KeyMaterial {
    static KEYS: OnceLock<(String, String)> = OnceLock::new();
    let (private_pem, public_pem) = KEYS.get_or_init(|| {
        let private_key = RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA keygen");
        (
            private_key
                .to_pkcs8_pem(LineEnding::LF)
                .expect("PKCS#8 export")
                .to_string(),
            private_key
                .to_public_key()
                .to_public_key_pem(LineEnding::LF)
                .expect("SPKI export"),
        )
    });
    KeyMaterial::new(private_pem.clone(), public_pem.clone())
}

fn gatekeeper_with_store() -> (Gatekeeper, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let gate = Gatekeeper::new(Arc::clone(&store) as Arc<dyn TokenStore>, &key_material())
        .expect("valid key material");
    (gate, store)
}

#[tokio::test]
async fn round_trip_with_empty_deny_list() {
    let (gate, store) = gatekeeper_with_store();
    let encoded = gate
        .create_token("alice", OffsetDateTime::now_utc() + Duration::hours(1))
        .unwrap();

    assert_eq!(store.revoked_count().await, 0);
    assert!(gate.validate_token(&encoded).await.unwrap());
}

#[tokio::test]
async fn tampering_with_the_signature_invalidates_the_token() {
    let (gate, _) = gatekeeper_with_store();
    let encoded = gate
        .create_token("alice", OffsetDateTime::now_utc() + Duration::hours(1))
        .unwrap();

    let (payload, signature) = encoded.split_once(TOKEN_SEPARATOR).unwrap();
    for position in 0..signature.len() {
        let original = signature.as_bytes()[position] as char;
        let replacement = if original == 'A' { 'B' } else { 'A' };
        let mut flipped = signature.to_string();
        flipped.replace_range(position..=position, &replacement.to_string());
        let tampered = format!("{payload}{TOKEN_SEPARATOR}{flipped}");
        assert!(
            !gate.validate_token(&tampered).await.unwrap(),
            "flip at {position} accepted"
        );
    }
}

#[tokio::test]
async fn expired_tokens_fail_regardless_of_deny_list() {
    let (gate, _) = gatekeeper_with_store();
    let encoded = gate
        .create_token("alice", OffsetDateTime::now_utc() - Duration::minutes(1))
        .unwrap();

    // Signature is genuine and the session is not revoked; expiration alone
    // rejects it.
    assert!(gate.inspect_token(&encoded).is_ok());
    assert!(!gate.validate_token(&encoded).await.unwrap());
}

#[tokio::test]
async fn revocation_rejects_an_otherwise_valid_token() {
    let (gate, store) = gatekeeper_with_store();
    let encoded = gate
        .create_token(1, datetime!(2030-01-01 00:00 UTC))
        .unwrap();
    assert!(gate.validate_token(&encoded).await.unwrap());

    let session_id = gate.inspect_token(&encoded).unwrap().session_id;
    assert!(gate.revoke_token(&session_id).await.unwrap());
    assert_eq!(store.revoked_count().await, 1);
    assert!(!gate.validate_token(&encoded).await.unwrap());

    // Other sessions are unaffected.
    let other = gate
        .create_token(2, datetime!(2030-01-01 00:00 UTC))
        .unwrap();
    assert!(gate.validate_token(&other).await.unwrap());
}

#[tokio::test]
async fn malformed_input_never_errors() {
    let (gate, _) = gatekeeper_with_store();
    for input in ["", "not-a-real-token", ".", "..", "only.", ".only", "a.b.c"] {
        assert!(!gate.validate_token(input).await.unwrap(), "{input:?} accepted");
    }
}

#[tokio::test]
async fn sync_rules_gate_async_rules() {
    let (gate, _) = gatekeeper_with_store();
    let async_calls = Arc::new(AtomicUsize::new(0));

    #[derive(Debug)]
    struct Account {
        active: bool,
        balance: i64,
    }

    let mut rules: Ruleset<Account> = Ruleset::new();
    rules.add_sync_rule(sync_rule(|account: &Account| account.active));
    rules.add_async_rule({
        let async_calls = Arc::clone(&async_calls);
        async_rule(move |account: &Account| {
            async_calls.fetch_add(1, Ordering::SeqCst);
            let solvent = account.balance >= 0;
            async move { solvent }
        })
    });

    let inactive = Account {
        active: false,
        balance: 100,
    };
    assert!(!gate.validate_user(&inactive, &rules).await);
    assert_eq!(async_calls.load(Ordering::SeqCst), 0);

    let good = Account {
        active: true,
        balance: 100,
    };
    assert!(gate.validate_user(&good, &rules).await);
    assert_eq!(async_calls.load(Ordering::SeqCst), 1);

    let overdrawn = Account {
        active: true,
        balance: -5,
    };
    assert!(!gate.validate_user(&overdrawn, &rules).await);
    assert_eq!(async_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn deny_list_pruning_reinstates_nothing_live() {
    let (gate, store) = gatekeeper_with_store();
    let encoded = gate
        .create_token("alice", OffsetDateTime::now_utc() + Duration::hours(1))
        .unwrap();
    let session_id = gate.inspect_token(&encoded).unwrap().session_id;
    gate.revoke_token(&session_id).await.unwrap();

    // Pruning strictly before the revocation instant keeps the record.
    store.prune_before(0).await;
    assert!(!gate.validate_token(&encoded).await.unwrap());
}
