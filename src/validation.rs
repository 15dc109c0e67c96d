//! Transaction validation against the current UTXO pool

use crate::signature::SignatureVerifier;
use crate::transaction::raw_data_to_sign;
use crate::types::*;
use crate::utxo_pool::UtxoPool;
use std::collections::HashSet;
use tracing::trace;

/// CheckTx: 𝒯𝒳 × 𝒰𝒮 → {valid, invalid}
///
/// A transaction tx = (ins, outs) is valid against pool us if and only if:
/// 1. ∀i ∈ ins: i.prevout ∈ us
/// 2. ∀i ∈ ins: Verify(us(i.prevout).key, RawDataToSign(tx, i), i.sig)
/// 3. no prevout appears twice in ins
/// 4. ∀o ∈ outs: o.value ≥ 0
/// 5. Σᵢ us(i.prevout).value ≥ Σₒ o.value
///
/// Reads the pool only; the same pool state always yields the same answer.
pub fn check_tx<V: SignatureVerifier + ?Sized>(
    tx: &Transaction,
    utxo_pool: &UtxoPool,
    verifier: &V,
) -> ValidationResult {
    let result = evaluate(tx, utxo_pool, verifier);
    if let ValidationResult::Invalid(reason) = &result {
        trace!(%reason, "transaction rejected");
    }
    result
}

/// Boolean form of [`check_tx`]
pub fn is_valid_tx<V: SignatureVerifier + ?Sized>(
    tx: &Transaction,
    utxo_pool: &UtxoPool,
    verifier: &V,
) -> bool {
    check_tx(tx, utxo_pool, verifier).is_valid()
}

fn evaluate<V: SignatureVerifier + ?Sized>(
    tx: &Transaction,
    utxo_pool: &UtxoPool,
    verifier: &V,
) -> ValidationResult {
    let mut claimed: HashSet<UtxoId> = HashSet::with_capacity(tx.inputs.len());
    let mut total_input_value: i128 = 0;

    for (i, input) in tx.inputs.iter().enumerate() {
        // 1. Referenced output must be unspent
        let prev_output = match utxo_pool.get_tx_output(&input.prevout) {
            Some(output) => output,
            None => {
                return ValidationResult::Invalid(RejectReason::UnknownUtxo {
                    input: i,
                    utxo: input.prevout,
                })
            }
        };

        // 2. Signature by the owner over this input's message
        let signed = raw_data_to_sign(tx, i)
            .map(|message| verifier.verify(&prev_output.public_key, &message, &input.signature))
            .unwrap_or(false);
        if !signed {
            return ValidationResult::Invalid(RejectReason::InvalidSignature { input: i });
        }

        // 3. No double claim within the transaction
        if !claimed.insert(input.prevout) {
            return ValidationResult::Invalid(RejectReason::DuplicateInput {
                input: i,
                utxo: input.prevout,
            });
        }

        total_input_value += prev_output.value as i128;
    }

    let mut total_output_value: i128 = 0;
    for (i, output) in tx.outputs.iter().enumerate() {
        // 4. Non-negative outputs
        if output.value < 0 {
            return ValidationResult::Invalid(RejectReason::NegativeOutput {
                output: i,
                value: output.value,
            });
        }
        total_output_value += output.value as i128;
    }

    // 5. No value creation
    if total_input_value < total_output_value {
        return ValidationResult::Invalid(RejectReason::InsufficientInputValue {
            inputs: total_input_value,
            outputs: total_output_value,
        });
    }

    ValidationResult::Valid
}
