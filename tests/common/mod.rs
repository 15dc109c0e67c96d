//! Shared fixtures: deterministic keys and signed transactions

#![allow(dead_code)]

use utxo_tx_handler::signature::{public_key_bytes, sign_message};
use utxo_tx_handler::*;

pub const K1: [u8; 32] = [0x11; 32];
pub const K2: [u8; 32] = [0x22; 32];
pub const K3: [u8; 32] = [0x33; 32];
pub const K4: [u8; 32] = [0x44; 32];

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn pubkey(secret: &[u8; 32]) -> ByteString {
    public_key_bytes(secret).expect("valid test key")
}

pub fn output(value: Amount, owner: &[u8; 32]) -> TransactionOutput {
    TransactionOutput {
        value,
        public_key: pubkey(owner),
    }
}

pub fn pool_of(entries: &[(UtxoId, Amount, [u8; 32])]) -> UtxoPool {
    UtxoPool::from_entries(
        entries
            .iter()
            .map(|(id, value, owner)| (*id, output(*value, owner))),
    )
}

/// Spend `inputs` (each signed by the paired key) into `outputs`
pub fn build_tx(inputs: &[(UtxoId, [u8; 32])], outputs: &[(Amount, [u8; 32])]) -> Transaction {
    let mut tx = Transaction::new();
    for (id, _) in inputs {
        tx.add_input(id.hash, id.index);
    }
    for (value, owner) in outputs {
        tx.add_output(*value, pubkey(owner));
    }
    for (i, (_, signer)) in inputs.iter().enumerate() {
        let message = tx.raw_data_to_sign(i).expect("input exists");
        tx.add_signature(sign_message(signer, &message).expect("valid test key"), i);
    }
    tx
}

/// Where output `index` of `tx` lands once `tx` is committed
pub fn created(tx: &Transaction, index: u32) -> UtxoId {
    UtxoId::new(utxo_tx_handler::transaction::calculate_tx_id(tx), index)
}

/// Re-sign input `index` with extra nonce data: a different, equally valid signature
pub fn resign_with_nonce(tx: &Transaction, index: usize, signer: &[u8; 32], nonce: &[u8; 32]) -> Transaction {
    use secp256k1::{Message, Secp256k1, SecretKey};
    use sha2::{Digest, Sha256};

    let message = tx.raw_data_to_sign(index).expect("input exists");
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(&message));

    let secp = Secp256k1::new();
    let sk = SecretKey::from_slice(signer).expect("valid test key");
    let sig = secp.sign_ecdsa_with_noncedata(&Message::from_digest(digest), &sk, nonce);

    let mut resigned = tx.clone();
    resigned.add_signature(sig.serialize_der().to_vec(), index);
    resigned
}
