use crate::error::{Result, WalletError};
use crate::types::{Address, Signature};

use super::request::{TransactionRequest, Witness};

/// Witness slot of the first input owned by `owner`, in input order.
///
/// Predicate inputs and contract inputs never own a slot and are skipped.
pub fn resolve_witness_index(tx: &TransactionRequest, owner: &Address) -> Option<u16> {
    owned_slots(tx, owner).next()
}

fn owned_slots<'a>(
    tx: &'a TransactionRequest,
    owner: &'a Address,
) -> impl Iterator<Item = u16> + 'a {
    tx.inputs
        .iter()
        .filter(move |input| input.owner().as_ref() == Some(owner))
        .filter_map(|input| input.witness_index())
}

/// Write `signature` into the slot owned by `owner`.
///
/// Grows the witness list with empty placeholders when the slot lies past
/// its end and overwrites whatever the slot held before. Fails when `owner`
/// spends no input, or when two of its inputs name different slots.
pub fn set_witness_at_owner(
    tx: &mut TransactionRequest,
    owner: &Address,
    signature: &Signature,
) -> Result<()> {
    let first = {
        let mut slots = owned_slots(tx, owner);
        let first = slots.next().ok_or(WalletError::UnknownOwner(*owner))?;
        if let Some(conflicting) = slots.find(|slot| *slot != first) {
            return Err(WalletError::ConflictingWitnessSlots {
                owner: *owner,
                first,
                conflicting,
            });
        }
        first
    };

    tx.set_witness(first, Witness::from(*signature));
    Ok(())
}
