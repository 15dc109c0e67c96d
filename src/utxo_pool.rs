//! The pool of unspent transaction outputs

use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// UTXO Set: 𝒰𝒮 = 𝒪 → 𝒯
///
/// A key present in the pool is spendable exactly once: removing it spends
/// the output, inserting it creates one. `Clone` yields an independent deep
/// copy, which is how a handler takes ownership of a caller's snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<UtxoEntry>", into = "Vec<UtxoEntry>")]
pub struct UtxoPool {
    utxos: HashMap<UtxoId, TransactionOutput>,
}

/// One `(utxo, output)` pair of a serialized pool snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub utxo: UtxoId,
    pub output: TransactionOutput,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Build a pool from `(utxo, output)` pairs; a repeated key keeps its last output
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (UtxoId, TransactionOutput)>,
    {
        Self {
            utxos: entries.into_iter().collect(),
        }
    }

    /// Insert `output` under `utxo`, returning whatever was stored there before
    pub fn add_utxo(&mut self, utxo: UtxoId, output: TransactionOutput) -> Option<TransactionOutput> {
        self.utxos.insert(utxo, output)
    }

    /// Spend `utxo`, returning its output if it was present
    pub fn remove_utxo(&mut self, utxo: &UtxoId) -> Option<TransactionOutput> {
        self.utxos.remove(utxo)
    }

    pub fn get_tx_output(&self, utxo: &UtxoId) -> Option<&TransactionOutput> {
        self.utxos.get(utxo)
    }

    pub fn contains(&self, utxo: &UtxoId) -> bool {
        self.utxos.contains_key(utxo)
    }

    /// Every live UtxoId, sorted so listings are reproducible
    pub fn all_utxos(&self) -> Vec<UtxoId> {
        let mut ids: Vec<UtxoId> = self.utxos.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UtxoId, &TransactionOutput)> {
        self.utxos.iter()
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Sum of every live output value
    pub fn total_value(&self) -> i128 {
        self.utxos.values().map(|o| o.value as i128).sum()
    }
}

impl From<Vec<UtxoEntry>> for UtxoPool {
    fn from(entries: Vec<UtxoEntry>) -> Self {
        Self::from_entries(entries.into_iter().map(|e| (e.utxo, e.output)))
    }
}

impl From<UtxoPool> for Vec<UtxoEntry> {
    fn from(pool: UtxoPool) -> Self {
        let mut entries: Vec<UtxoEntry> = pool
            .utxos
            .into_iter()
            .map(|(utxo, output)| UtxoEntry { utxo, output })
            .collect();
        entries.sort_by(|a, b| a.utxo.cmp(&b.utxo));
        entries
    }
}
