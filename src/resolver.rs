//! Batch resolution: accept a mutually consistent subset of a batch

use crate::commit::try_accept;
use crate::config::{HandlerConfig, ScanOrder};
use crate::signature::SignatureVerifier;
use crate::transaction::calculate_tx_id;
use crate::types::*;
use crate::utxo_pool::UtxoPool;
use tracing::debug;

/// Outcome of resolving one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResolution {
    /// Committed transactions, hash-stamped, in acceptance order
    pub accepted: Vec<Transaction>,
    /// Candidates still pending at the fixed point, in scan order
    pub rejected: Vec<Transaction>,
    /// Scans performed, including the final one that accepted nothing
    pub passes: usize,
}

/// Resolve: 𝒯𝒳* × 𝒰𝒮 → 𝒯𝒳* × 𝒰𝒮
///
/// Greedy first-fit fixed point over an explicit worklist:
/// 1. Order the candidates by `config.scan_order` (optionally dropping exact duplicates)
/// 2. Scan from the front; commit the first candidate `try_accept` admits,
///    append it to the result, drop it from the worklist, rescan from the front
/// 3. Stop when the worklist is empty or a full scan admits nothing
///
/// Chains inside a batch settle in dependency order whatever the submission
/// order. Among conflicting candidates the first valid one in scan order wins;
/// no attempt is made to maximise the count or value accepted.
pub fn resolve<V: SignatureVerifier + ?Sized>(
    candidates: &[Transaction],
    utxo_pool: &mut UtxoPool,
    verifier: &V,
    config: &HandlerConfig,
) -> BatchResolution {
    let mut pending = build_worklist(candidates, config);
    let mut accepted = Vec::new();
    let mut passes = 0;

    while !pending.is_empty() {
        passes += 1;

        let admitted = pending
            .iter()
            .enumerate()
            .find_map(|(position, tx)| try_accept(tx, utxo_pool, verifier).map(|c| (position, c)));

        match admitted {
            Some((position, committed)) => {
                pending.remove(position);
                accepted.push(committed);
            }
            None => break,
        }
    }

    debug!(
        candidates = candidates.len(),
        accepted = accepted.len(),
        rejected = pending.len(),
        passes,
        "batch resolved"
    );

    BatchResolution {
        accepted,
        rejected: pending,
        passes,
    }
}

/// Worklist in scan order
fn build_worklist(candidates: &[Transaction], config: &HandlerConfig) -> Vec<Transaction> {
    let mut worklist: Vec<Transaction> = Vec::with_capacity(candidates.len());
    for tx in candidates {
        if config.dedup_candidates && worklist.iter().any(|seen| same_content(seen, tx)) {
            continue;
        }
        worklist.push(tx.clone());
    }

    if config.scan_order == ScanOrder::ContentHash {
        // the tx id ignores signatures, so re-signed copies tie on it alone
        worklist.sort_by_cached_key(|tx| (calculate_tx_id(tx), tx.raw_tx()));
    }

    worklist
}

/// Equal inputs (signatures included) and outputs; a cached hash is ignored
fn same_content(a: &Transaction, b: &Transaction) -> bool {
    a.inputs == b.inputs && a.outputs == b.outputs
}
