use sha2::{Digest, Sha256};

use crate::types::{Bytes32, TxId};

use super::encoding::Encode;
use super::request::TransactionRequest;

/// Copy of `tx` holding only what a signature commits to: everything but the
/// witness list.
pub fn signable_view(tx: &TransactionRequest) -> TransactionRequest {
    let mut view = tx.clone();
    view.witnesses.clear();
    view
}

/// `SHA-256(chain_id || canonical encoding of the signable view)`.
pub fn compute_signing_digest(tx: &TransactionRequest, chain_id: u64) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(chain_id.to_be_bytes());
    hasher.update(signable_view(tx).to_bytes());
    hasher.finalize().into()
}

pub fn transaction_id(tx: &TransactionRequest, chain_id: u64) -> TxId {
    TxId::new(compute_signing_digest(tx, chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{Coin, Input, MessageCoin, Output, TxPointer, UtxoId, Witness};
    use crate::types::{Address, AssetId, ContractId};

    fn sample_tx() -> TransactionRequest {
        let owner = Address::new([1u8; 32]);
        let mut tx = TransactionRequest::new().with_script_gas_limit(10_000);
        tx.add_coin_input(Coin {
            owner,
            amount: 100,
            ..Default::default()
        })
        .unwrap();
        tx.add_coin_output(Address::new([2u8; 32]), 40, AssetId::zeroed());
        tx.add_change_output(owner, AssetId::zeroed());
        tx
    }

    #[test]
    fn deterministic() {
        let tx = sample_tx();
        assert_eq!(compute_signing_digest(&tx, 0), compute_signing_digest(&tx, 0));
    }

    #[test]
    fn chain_bound() {
        let tx = sample_tx();
        assert_ne!(compute_signing_digest(&tx, 0), compute_signing_digest(&tx, 1));
    }

    #[test]
    fn ignores_witness_contents() {
        let mut tx = sample_tx();
        let before = compute_signing_digest(&tx, 9);
        tx.set_witness(0, Witness(vec![0xde; 64]));
        tx.add_witness(Witness(vec![0xad])).unwrap();
        assert_eq!(compute_signing_digest(&tx, 9), before);
    }

    #[test]
    fn covers_inputs_outputs_and_metadata() {
        let tx = sample_tx();
        let base = compute_signing_digest(&tx, 9);

        let mut changed = tx.clone();
        if let Input::Coin(coin) = &mut changed.inputs[0] {
            coin.amount += 1;
        }
        assert_ne!(compute_signing_digest(&changed, 9), base);

        let mut changed = tx.clone();
        changed.add_coin_output(Address::new([3u8; 32]), 1, AssetId::zeroed());
        assert_ne!(compute_signing_digest(&changed, 9), base);

        let changed = tx.clone().with_tip(1);
        assert_ne!(compute_signing_digest(&changed, 9), base);
    }

    #[test]
    fn covers_every_input_and_output_field() {
        let mut tx = sample_tx();
        tx.add_message_input(MessageCoin {
            recipient: Address::new([1u8; 32]),
            amount: 7,
            ..Default::default()
        })
        .unwrap();
        tx.add_contract_input_and_output(ContractId::new([4u8; 32]))
            .unwrap();
        tx.outputs.push(Output::Variable {
            to: Address::zeroed(),
            amount: 0,
            asset_id: AssetId::zeroed(),
        });
        let base = compute_signing_digest(&tx, 9);

        let mutations: [(&str, fn(&mut TransactionRequest)); 9] = [
            ("coin tx_pointer", |tx| {
                if let Input::Coin(coin) = &mut tx.inputs[0] {
                    coin.tx_pointer = TxPointer {
                        block_height: 99,
                        tx_index: 7,
                    };
                }
            }),
            ("coin predicate_gas_used", |tx| {
                if let Input::Coin(coin) = &mut tx.inputs[0] {
                    coin.predicate_gas_used = 5;
                }
            }),
            ("message predicate_gas_used", |tx| {
                if let Input::Message(message) = &mut tx.inputs[1] {
                    message.predicate_gas_used = 5;
                }
            }),
            ("contract utxo_id", |tx| {
                if let Input::Contract(contract) = &mut tx.inputs[2] {
                    contract.utxo_id = UtxoId {
                        tx_id: TxId::new([8u8; 32]),
                        output_index: 1,
                    };
                }
            }),
            ("contract input roots", |tx| {
                if let Input::Contract(contract) = &mut tx.inputs[2] {
                    contract.balance_root = [1u8; 32];
                    contract.state_root = [2u8; 32];
                }
            }),
            ("contract tx_pointer", |tx| {
                if let Input::Contract(contract) = &mut tx.inputs[2] {
                    contract.tx_pointer.block_height = 3;
                }
            }),
            ("contract output roots", |tx| {
                if let Output::Contract { state_root, .. } = &mut tx.outputs[2] {
                    *state_root = [6u8; 32];
                }
            }),
            ("change amount", |tx| {
                if let Output::Change { amount, .. } = &mut tx.outputs[1] {
                    *amount = 12_345;
                }
            }),
            ("variable output", |tx| {
                if let Output::Variable { to, amount, .. } = &mut tx.outputs[3] {
                    *to = Address::new([5u8; 32]);
                    *amount = 1;
                }
            }),
        ];

        for (field, mutate) in mutations {
            let mut changed = tx.clone();
            mutate(&mut changed);
            assert_ne!(changed, tx, "{field} mutation had no effect");
            assert_ne!(compute_signing_digest(&changed, 9), base, "{field}");
        }
    }

    #[test]
    fn transaction_id_matches_digest() {
        let tx = sample_tx();
        assert_eq!(
            transaction_id(&tx, 4).as_bytes(),
            &compute_signing_digest(&tx, 4)
        );
        assert_eq!(tx.transaction_id(4), transaction_id(&tx, 4));
    }
}
