use std::sync::Arc;

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};

use wallet_signer::Secp256k1Signer;
use wallet_signer::signing::{hash_message, recover_address, recover_message_address};
use wallet_signer::transaction::{Coin, TransactionRequest, compute_signing_digest};
use wallet_signer::types::{Address, Bytes32};

fn signers(count: usize) -> Vec<Secp256k1Signer> {
    let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
    (0..count).map(|_| Secp256k1Signer::generate(&mut rng)).collect()
}

#[test]
fn address_is_deterministic_per_key() {
    let mut rng = ChaCha20Rng::from_seed([12u8; 32]);
    for _ in 0..16 {
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut key);
        let (Ok(a), Ok(b)) = (
            Secp256k1Signer::from_bytes(&key),
            Secp256k1Signer::from_bytes(&key),
        ) else {
            continue;
        };
        assert_eq!(a.address(), b.address());
    }
}

#[test]
fn signatures_verify_for_many_keys_and_digests() {
    let mut rng = ChaCha20Rng::from_seed([13u8; 32]);
    for signer in signers(8) {
        for _ in 0..8 {
            let mut digest: Bytes32 = [0u8; 32];
            rng.fill_bytes(&mut digest);
            let signature = signer.sign_digest(&digest).unwrap();
            assert!(signer.public_key().verify(&digest, &signature));
            assert_eq!(recover_address(&digest, &signature).unwrap(), signer.address());
        }
    }
}

#[test]
fn chain_binding_holds_across_chain_ids() {
    let owner = Address::new([1u8; 32]);
    let mut tx = TransactionRequest::new().with_script_gas_limit(1);
    tx.add_coin_input(Coin {
        owner,
        amount: 1,
        ..Default::default()
    })
    .unwrap();

    let digests: Vec<Bytes32> = (0u64..32)
        .map(|chain_id| compute_signing_digest(&tx, chain_id))
        .collect();
    for (i, a) in digests.iter().enumerate() {
        for b in &digests[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn message_signature_recovers_to_signer_only() {
    let all = signers(3);
    let signature = all[0].sign_digest(&hash_message(b"gm")).unwrap();
    let recovered = recover_message_address(b"gm", &signature).unwrap();
    assert_eq!(recovered, all[0].address());
    assert_ne!(recovered, all[1].address());
    assert_ne!(recovered, all[2].address());
}

#[tokio::test]
async fn concurrent_signing_does_not_interfere() {
    let signer = Arc::new(Secp256k1Signer::from_bytes(&[0x21; 32]).unwrap());

    let tasks: Vec<_> = (0u32..32)
        .map(|i| {
            let signer = Arc::clone(&signer);
            tokio::spawn(async move {
                let digest: Bytes32 = Sha256::digest(i.to_be_bytes()).into();
                (digest, signer.sign_digest(&digest).unwrap())
            })
        })
        .collect();

    for task in tasks {
        let (digest, signature) = task.await.unwrap();
        assert!(signer.public_key().verify(&digest, &signature));
        assert_eq!(signer.sign_digest(&digest).unwrap(), signature);
    }
}
