//! Single-transaction acceptance

use crate::signature::SignatureVerifier;
use crate::types::*;
use crate::utxo_pool::UtxoPool;
use crate::validation::is_valid_tx;
use tracing::debug;

/// TryAccept: 𝒯𝒳 × 𝒰𝒮 → (𝒯𝒳 × 𝒰𝒮) ∪ {⊥}
///
/// For transaction tx and UTXO set us:
/// 1. If tx is not valid against us: return ⊥, us unchanged
/// 2. us' = us \ {i.prevout : i ∈ tx.inputs}
/// 3. tx' = clone of tx with its content hash h computed once
/// 4. us'' = us' ∪ {(h, i) ↦ tx'.outputs[i] : i ∈ [0, |tx'.outputs|)}
/// 5. Return tx'
///
/// Steps 2-4 happen under a single `&mut` borrow of the pool, so nothing can
/// observe the pool between the removals and the insertions. The caller's
/// `tx` is only read.
pub fn try_accept<V: SignatureVerifier + ?Sized>(
    tx: &Transaction,
    utxo_pool: &mut UtxoPool,
    verifier: &V,
) -> Option<Transaction> {
    if !is_valid_tx(tx, utxo_pool, verifier) {
        return None;
    }

    Some(apply_transaction(tx, utxo_pool))
}

/// ApplyTransaction: consume the inputs and create the outputs of a
/// transaction already known to be valid against `utxo_pool`
fn apply_transaction(tx: &Transaction, utxo_pool: &mut UtxoPool) -> Transaction {
    for input in &tx.inputs {
        utxo_pool.remove_utxo(&input.prevout);
    }

    let mut committed = tx.clone();
    let tx_id = committed.compute_hash();

    for (i, output) in committed.outputs.iter().enumerate() {
        utxo_pool.add_utxo(UtxoId::new(tx_id, i as OutputIndex), output.clone());
    }

    debug!(
        spent = committed.inputs.len(),
        created = committed.outputs.len(),
        tx_id = %short_hex(&tx_id),
        "transaction committed"
    );

    committed
}
