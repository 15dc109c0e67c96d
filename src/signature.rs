//! Signature oracle: ECDSA over secp256k1
//!
//! The validator only needs `verify(public_key, message, signature)`; it is
//! expressed as a trait so tests and embedders can plug in another scheme.

use crate::error::{HandlerError, Result};
use crate::types::ByteString;
use secp256k1::{ecdsa::Signature, All, Message, PublicKey, Secp256k1, SecretKey, Verification};
use sha2::{Digest, Sha256};

/// Verify(pk, m, σ) → {true, false}
pub trait SignatureVerifier {
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&[u8], &[u8], &[u8]) -> bool,
{
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        self(public_key, message, signature)
    }
}

/// Default verifier: SEC1 public keys, DER signatures, SHA-256 message digest
#[derive(Debug, Clone)]
pub struct Secp256k1Verifier {
    secp: Secp256k1<secp256k1::VerifyOnly>,
}

impl Secp256k1Verifier {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }
}

impl Default for Secp256k1Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureVerifier for Secp256k1Verifier {
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        verify_signature(&self.secp, public_key, message, signature)
    }
}

/// Verify a DER ECDSA signature; any parse failure counts as a bad signature
fn verify_signature<C: Verification>(
    secp: &Secp256k1<C>,
    pubkey_bytes: &[u8],
    message: &[u8],
    signature_bytes: &[u8],
) -> bool {
    let pubkey = match PublicKey::from_slice(pubkey_bytes) {
        Ok(pk) => pk,
        Err(_) => return false,
    };

    let signature = match Signature::from_der(signature_bytes) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    let digest = message_digest(message);
    secp.verify_ecdsa(&digest, &signature, &pubkey).is_ok()
}

fn message_digest(message: &[u8]) -> Message {
    let mut hasher = Sha256::new();
    hasher.update(message);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    Message::from_digest(hash)
}

/// Sign `message` with a 32-byte secret key, returning a DER signature
pub fn sign_message(secret_key: &[u8], message: &[u8]) -> Result<ByteString> {
    let secp = Secp256k1::<All>::new();
    let sk = parse_secret_key(secret_key)?;
    let signature = secp.sign_ecdsa(&message_digest(message), &sk);
    Ok(signature.serialize_der().to_vec())
}

/// Compressed SEC1 public key for a 32-byte secret key
pub fn public_key_bytes(secret_key: &[u8]) -> Result<ByteString> {
    let secp = Secp256k1::<All>::new();
    let sk = parse_secret_key(secret_key)?;
    Ok(PublicKey::from_secret_key(&secp, &sk).serialize().to_vec())
}

fn parse_secret_key(secret_key: &[u8]) -> Result<SecretKey> {
    SecretKey::from_slice(secret_key).map_err(|e| HandlerError::InvalidKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_A: [u8; 32] = [0x11; 32];
    const KEY_B: [u8; 32] = [0x22; 32];

    #[test]
    fn test_sign_and_verify() {
        let verifier = Secp256k1Verifier::new();
        let pk = public_key_bytes(&KEY_A).unwrap();
        let sig = sign_message(&KEY_A, b"spend utxo 0").unwrap();

        assert_eq!(pk.len(), 33);
        assert!(verifier.verify(&pk, b"spend utxo 0", &sig));
    }

    #[test]
    fn test_verify_wrong_message() {
        let verifier = Secp256k1Verifier::new();
        let pk = public_key_bytes(&KEY_A).unwrap();
        let sig = sign_message(&KEY_A, b"spend utxo 0").unwrap();

        assert!(!verifier.verify(&pk, b"spend utxo 1", &sig));
    }

    #[test]
    fn test_verify_wrong_key() {
        let verifier = Secp256k1Verifier::new();
        let pk_b = public_key_bytes(&KEY_B).unwrap();
        let sig = sign_message(&KEY_A, b"msg").unwrap();

        assert!(!verifier.verify(&pk_b, b"msg", &sig));
    }

    #[test]
    fn test_verify_malformed_inputs() {
        let verifier = Secp256k1Verifier::new();
        let pk = public_key_bytes(&KEY_A).unwrap();
        let sig = sign_message(&KEY_A, b"msg").unwrap();

        assert!(!verifier.verify(&[0x02; 5], b"msg", &sig));
        assert!(!verifier.verify(&pk, b"msg", &[0x30, 0x00]));
        assert!(!verifier.verify(&pk, b"msg", &[]));
        assert!(!verifier.verify(&[], b"msg", &sig));
    }

    #[test]
    fn test_invalid_secret_key() {
        assert!(matches!(
            sign_message(&[0u8; 32], b"msg"),
            Err(HandlerError::InvalidKey(_))
        ));
        assert!(public_key_bytes(&[1u8; 31]).is_err());
    }

    #[test]
    fn test_closure_verifier() {
        let accept_all = |_: &[u8], _: &[u8], _: &[u8]| true;
        assert!(accept_all.verify(b"", b"", b""));
    }
}
