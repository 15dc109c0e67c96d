//! # UTXO Transaction Handler
//!
//! Transaction-acceptance stage of a single-node UTXO ledger: decides which
//! candidate transactions are individually valid against a pool of unspent
//! outputs, and which subset of an unordered batch is jointly valid.
//!
//! ## Architecture
//!
//! Leaf-first:
//! - [`utxo_pool`]: the UTXO store, `UtxoId → TransactionOutput`
//! - [`signature`]: the signature oracle (ECDSA over secp256k1 by default)
//! - [`transaction`]: canonical encoding, message to sign, content hash
//! - [`validation`]: the five-rule validity predicate
//! - [`commit`]: single-transaction acceptance
//! - [`resolver`]: batch fixed-point resolution
//!
//! [`TxHandler`] owns a private copy of the pool and ties the pieces together.
//!
//! ## Usage
//!
//! ```rust
//! use utxo_tx_handler::TxHandler;
//! use utxo_tx_handler::signature::{public_key_bytes, sign_message};
//! use utxo_tx_handler::types::*;
//! use utxo_tx_handler::utxo_pool::UtxoPool;
//!
//! let alice = [0x11u8; 32];
//! let bob = [0x22u8; 32];
//!
//! let u1 = UtxoId::new([1; 32], 0);
//! let pool = UtxoPool::from_entries(vec![(u1, TransactionOutput {
//!     value: 10,
//!     public_key: public_key_bytes(&alice).unwrap(),
//! })]);
//!
//! let mut tx = Transaction::new();
//! tx.add_input(u1.hash, u1.index);
//! tx.add_output(10, public_key_bytes(&bob).unwrap());
//! let message = tx.raw_data_to_sign(0).unwrap();
//! tx.add_signature(sign_message(&alice, &message).unwrap(), 0);
//!
//! let mut handler = TxHandler::new(&pool);
//! let accepted = handler.handle_txs(&[tx]);
//! assert_eq!(accepted.len(), 1);
//! assert!(!handler.utxo_pool().contains(&u1));
//! ```

pub mod types;
pub mod transaction;
pub mod utxo_pool;
pub mod signature;
pub mod validation;
pub mod commit;
pub mod resolver;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use types::*;
pub use config::{HandlerConfig, ScanOrder};
pub use error::{HandlerError, Result};
pub use resolver::BatchResolution;
pub use signature::{Secp256k1Verifier, SignatureVerifier};
pub use utxo_pool::UtxoPool;

/// Ledger front end holding its own UTXO pool
///
/// The pool passed to a constructor is deep-copied; the caller's snapshot is
/// never touched afterwards. Every mutation goes through `&mut self`, so a
/// handler shared between threads needs a single `Mutex` around it.
///
/// # Examples
///
/// ```
/// use utxo_tx_handler::{TxHandler, UtxoPool, Transaction};
///
/// let pool = UtxoPool::new();
/// let handler = TxHandler::new(&pool);
///
/// // Nothing to spend, nothing created: trivially valid
/// assert!(handler.is_valid_tx(&Transaction::new()));
/// ```
#[derive(Debug, Clone)]
pub struct TxHandler<V: SignatureVerifier = Secp256k1Verifier> {
    utxo_pool: UtxoPool,
    verifier: V,
    config: HandlerConfig,
}

impl TxHandler<Secp256k1Verifier> {
    /// Create a handler over a copy of `utxo_pool` with default settings
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        Self::with_config(utxo_pool, HandlerConfig::default())
    }

    /// Create a handler over a copy of `utxo_pool` with explicit settings
    ///
    /// # Examples
    ///
    /// ```
    /// use utxo_tx_handler::{HandlerConfig, ScanOrder, TxHandler, UtxoPool};
    ///
    /// let config = HandlerConfig::default().with_scan_order(ScanOrder::ContentHash);
    /// let handler = TxHandler::with_config(&UtxoPool::new(), config);
    /// assert_eq!(handler.config().scan_order, ScanOrder::ContentHash);
    /// ```
    pub fn with_config(utxo_pool: &UtxoPool, config: HandlerConfig) -> Self {
        Self::with_verifier(utxo_pool, Secp256k1Verifier::new(), config)
    }
}

impl<V: SignatureVerifier> TxHandler<V> {
    /// Create a handler with a custom signature oracle
    pub fn with_verifier(utxo_pool: &UtxoPool, verifier: V, config: HandlerConfig) -> Self {
        Self {
            utxo_pool: utxo_pool.clone(),
            verifier,
            config,
        }
    }

    /// True if `tx` satisfies every acceptance rule against the current pool
    ///
    /// Has no side effects; see [`validation::check_tx`] for the rules.
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        validation::is_valid_tx(tx, &self.utxo_pool, &self.verifier)
    }

    /// Like [`is_valid_tx`](Self::is_valid_tx) but reports the first rule broken
    pub fn check_tx(&self, tx: &Transaction) -> ValidationResult {
        validation::check_tx(tx, &self.utxo_pool, &self.verifier)
    }

    /// Commit one transaction if it is valid
    ///
    /// Returns the hash-stamped committed copy; `tx` itself is left as is.
    pub fn handle_tx(&mut self, tx: &Transaction) -> Option<Transaction> {
        commit::try_accept(tx, &mut self.utxo_pool, &self.verifier)
    }

    /// Accept a mutually valid subset of `possible_txs`, in acceptance order
    ///
    /// Candidates that never become valid are dropped silently. Use
    /// [`resolve_batch`](Self::resolve_batch) to see them.
    pub fn handle_txs(&mut self, possible_txs: &[Transaction]) -> Vec<Transaction> {
        self.resolve_batch(possible_txs).accepted
    }

    /// Full outcome of resolving a batch
    pub fn resolve_batch(&mut self, possible_txs: &[Transaction]) -> BatchResolution {
        resolver::resolve(possible_txs, &mut self.utxo_pool, &self.verifier, &self.config)
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Give up the handler, keeping its pool
    pub fn into_utxo_pool(self) -> UtxoPool {
        self.utxo_pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{public_key_bytes, sign_message};

    const K1: [u8; 32] = [0x11; 32];
    const K2: [u8; 32] = [0x22; 32];

    fn pool() -> (UtxoId, UtxoPool) {
        let u1 = UtxoId::new([1; 32], 0);
        let pool = UtxoPool::from_entries(vec![(
            u1,
            TransactionOutput {
                value: 10,
                public_key: public_key_bytes(&K1).unwrap(),
            },
        )]);
        (u1, pool)
    }

    fn pay(utxo: UtxoId, value: Amount) -> Transaction {
        let mut tx = Transaction::new();
        tx.add_input(utxo.hash, utxo.index);
        tx.add_output(value, public_key_bytes(&K2).unwrap());
        let message = tx.raw_data_to_sign(0).unwrap();
        tx.add_signature(sign_message(&K1, &message).unwrap(), 0);
        tx
    }

    #[test]
    fn test_constructor_copies_snapshot() {
        let (u1, snapshot) = pool();
        let mut handler = TxHandler::new(&snapshot);

        assert!(handler.handle_tx(&pay(u1, 10)).is_some());
        assert!(snapshot.contains(&u1));
        assert!(!handler.utxo_pool().contains(&u1));
    }

    #[test]
    fn test_check_tx_reports_reason() {
        let (u1, snapshot) = pool();
        let handler = TxHandler::new(&snapshot);

        assert_eq!(handler.check_tx(&pay(u1, 10)), ValidationResult::Valid);
        assert!(matches!(
            handler.check_tx(&pay(u1, 11)),
            ValidationResult::Invalid(RejectReason::InsufficientInputValue { .. })
        ));
    }

    #[test]
    fn test_custom_verifier() {
        let (u1, snapshot) = pool();
        let mut tx = Transaction::new();
        tx.add_input(u1.hash, u1.index);
        tx.add_output(10, vec![]);

        let accept_all = |_: &[u8], _: &[u8], _: &[u8]| true;
        let mut handler = TxHandler::with_verifier(&snapshot, accept_all, HandlerConfig::default());
        assert!(handler.handle_tx(&tx).is_some());
    }

    #[test]
    fn test_into_utxo_pool() {
        let (u1, snapshot) = pool();
        let mut handler = TxHandler::new(&snapshot);
        let accepted = handler.handle_txs(&[pay(u1, 4)]);
        let hash = accepted[0].hash().unwrap();

        let final_pool = handler.into_utxo_pool();
        assert_eq!(final_pool.all_utxos(), vec![UtxoId::new(hash, 0)]);
    }
}
