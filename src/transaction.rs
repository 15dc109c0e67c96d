//! Transaction construction, canonical encoding and content hashing

use crate::types::*;
use bitcoin_hashes::{sha256d, Hash as BitcoinHash};

/// CanonicalBytes: 𝒯𝒳 × 𝔹 → 𝕊
///
/// Big-endian, length-prefixed encoding of a transaction:
/// 1. u32 input count, then per input: prev hash (32) ‖ index u32 ‖ sig len u32 ‖ sig
/// 2. u32 output count, then per output: value i64 ‖ key len u32 ‖ key
///
/// With `include_signatures = false` every signature is encoded as empty.
pub fn canonical_bytes(tx: &Transaction, include_signatures: bool) -> ByteString {
    let mut data = Vec::with_capacity(encoded_size_hint(tx));

    data.extend_from_slice(&(tx.inputs.len() as u32).to_be_bytes());
    for input in &tx.inputs {
        data.extend_from_slice(&input.prevout.hash);
        data.extend_from_slice(&input.prevout.index.to_be_bytes());
        if include_signatures {
            data.extend_from_slice(&(input.signature.len() as u32).to_be_bytes());
            data.extend_from_slice(&input.signature);
        } else {
            data.extend_from_slice(&0u32.to_be_bytes());
        }
    }

    data.extend_from_slice(&(tx.outputs.len() as u32).to_be_bytes());
    for output in &tx.outputs {
        data.extend_from_slice(&output.value.to_be_bytes());
        data.extend_from_slice(&(output.public_key.len() as u32).to_be_bytes());
        data.extend_from_slice(&output.public_key);
    }

    data
}

/// RawDataToSign: 𝒯𝒳 × ℕ → 𝕊 ∪ {⊥}
///
/// The message signed for input `index`: the index itself followed by the
/// signature-free canonical encoding. Returns `None` for an out-of-range index.
pub fn raw_data_to_sign(tx: &Transaction, index: usize) -> Option<ByteString> {
    if index >= tx.inputs.len() {
        return None;
    }

    let body = canonical_bytes(tx, false);
    let mut data = Vec::with_capacity(4 + body.len());
    data.extend_from_slice(&(index as u32).to_be_bytes());
    data.extend_from_slice(&body);
    Some(data)
}

/// TxId: 𝒯𝒳 → ℍ
///
/// Double SHA-256 over the signature-free encoding, so re-encoding a
/// signature cannot change the names of the outputs it creates.
pub fn calculate_tx_id(tx: &Transaction) -> Hash {
    sha256d::Hash::hash(&canonical_bytes(tx, false)).into_inner()
}

fn encoded_size_hint(tx: &Transaction) -> usize {
    8 + tx
        .inputs
        .iter()
        .map(|i| 32 + 4 + 4 + i.signature.len())
        .sum::<usize>()
        + tx
            .outputs
            .iter()
            .map(|o| 8 + 4 + o.public_key.len())
            .sum::<usize>()
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unsigned input spending `(prev_hash, index)`
    pub fn add_input(&mut self, prev_hash: Hash, index: OutputIndex) {
        self.inputs.push(TransactionInput {
            prevout: UtxoId::new(prev_hash, index),
            signature: Vec::new(),
        });
        self.hash = None;
    }

    pub fn add_output(&mut self, value: Amount, public_key: ByteString) {
        self.outputs.push(TransactionOutput { value, public_key });
        self.hash = None;
    }

    /// Attach `signature` to input `index`; returns false if there is no such input
    pub fn add_signature(&mut self, signature: ByteString, index: usize) -> bool {
        match self.inputs.get_mut(index) {
            Some(input) => {
                input.signature = signature;
                self.hash = None;
                true
            }
            None => false,
        }
    }

    pub fn remove_input(&mut self, index: usize) -> Option<TransactionInput> {
        if index >= self.inputs.len() {
            return None;
        }
        self.hash = None;
        Some(self.inputs.remove(index))
    }

    /// Remove the first input spending `utxo`
    pub fn remove_input_by_utxo(&mut self, utxo: &UtxoId) -> Option<TransactionInput> {
        let position = self.inputs.iter().position(|i| i.prevout == *utxo)?;
        self.remove_input(position)
    }

    pub fn raw_data_to_sign(&self, index: usize) -> Option<ByteString> {
        raw_data_to_sign(self, index)
    }

    /// Canonical encoding including signatures
    pub fn raw_tx(&self) -> ByteString {
        canonical_bytes(self, true)
    }

    /// Compute and store the content hash
    pub fn compute_hash(&mut self) -> Hash {
        let hash = calculate_tx_id(self);
        self.hash = Some(hash);
        hash
    }

    /// Stamp the hash once all edits are done; consuming form of [`compute_hash`](Self::compute_hash)
    pub fn finalize(mut self) -> Self {
        self.compute_hash();
        self
    }

    pub fn hash(&self) -> Option<Hash> {
        self.hash
    }

    pub fn input(&self, index: usize) -> Option<&TransactionInput> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&TransactionOutput> {
        self.outputs.get(index)
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }
}
