//! Core ledger types for UTXO transaction handling

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Amount type: fixed-point value in base units
///
/// Signed so that a negative output can be represented and rejected.
pub type Amount = i64;

/// Output position within a transaction
pub type OutputIndex = u32;

/// UtxoId: 𝒪 = ℍ × ℕ
///
/// Names one spendable output by the hash of the transaction that created it
/// and the output's position in that transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtxoId {
    pub hash: Hash,
    pub index: OutputIndex,
}

impl UtxoId {
    pub fn new(hash: Hash, index: OutputIndex) -> Self {
        Self { hash, index }
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..:{}", short_hex(&self.hash), self.index)
    }
}

/// First eight bytes of a hash as lowercase hex, for log lines
pub fn short_hex(hash: &Hash) -> String {
    hash[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Transaction Input: ℐ = 𝒪 × 𝕊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: UtxoId,
    pub signature: ByteString,
}

/// Transaction Output: 𝒯 = ℤ × 𝕂
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Amount,
    pub public_key: ByteString,
}

/// Transaction: 𝒯𝒳 = ℐ* × 𝒯* × ℍ?
///
/// `hash` stays `None` until the transaction is finalized; any edit made
/// through the builder methods clears it again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    #[serde(default)]
    pub hash: Option<Hash>,
}

/// Why a transaction was judged invalid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Input references an output that is not in the pool
    UnknownUtxo { input: usize, utxo: UtxoId },
    /// Input signature does not verify under the referenced owner key
    InvalidSignature { input: usize },
    /// Same output claimed twice by one transaction
    DuplicateInput { input: usize, utxo: UtxoId },
    /// Output carries a negative value
    NegativeOutput { output: usize, value: Amount },
    /// Outputs claim more value than the inputs provide
    InsufficientInputValue { inputs: i128, outputs: i128 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnknownUtxo { input, utxo } => {
                write!(f, "input {} references unknown utxo {}", input, utxo)
            }
            RejectReason::InvalidSignature { input } => {
                write!(f, "invalid signature on input {}", input)
            }
            RejectReason::DuplicateInput { input, utxo } => {
                write!(f, "input {} claims utxo {} a second time", input, utxo)
            }
            RejectReason::NegativeOutput { output, value } => {
                write!(f, "output {} has negative value {}", output, value)
            }
            RejectReason::InsufficientInputValue { inputs, outputs } => {
                write!(f, "outputs total {} exceeds inputs total {}", outputs, inputs)
            }
        }
    }
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(RejectReason),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}
