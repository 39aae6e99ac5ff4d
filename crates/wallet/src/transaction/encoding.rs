//! Canonical binary layout of a transaction.
//!
//! Integers are big-endian at their natural width, byte strings and lists
//! carry a `u64` length prefix, and every input and output variant starts with
//! a one-byte tag. The layout is what the signing digest is computed over, so
//! it must never depend on anything but field values.

use crate::types::{Address, AssetId, ContractId, Nonce, TxId};

use super::request::{
    CoinInput, ContractInput, Input, MessageInput, Output, TransactionRequest, TxPointer, UtxoId,
    Witness,
};

const TX_SCRIPT: u8 = 0;

const INPUT_COIN: u8 = 0;
const INPUT_CONTRACT: u8 = 1;
const INPUT_MESSAGE: u8 = 2;

const OUTPUT_COIN: u8 = 0;
const OUTPUT_CONTRACT: u8 = 1;
const OUTPUT_CHANGE: u8 = 2;
const OUTPUT_VARIABLE: u8 = 3;

/// Types with a canonical byte encoding.
pub trait Encode {
    fn encode_to(&self, out: &mut Vec<u8>);

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_to(&mut out);
        out
    }
}

impl Encode for u8 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }
}

impl Encode for u16 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl Encode for u32 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl Encode for u64 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl Encode for [u8; 32] {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl Encode for [u8] {
    fn encode_to(&self, out: &mut Vec<u8>) {
        (self.len() as u64).encode_to(out);
        out.extend_from_slice(self);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_to(&self, out: &mut Vec<u8>) {
        (self.len() as u64).encode_to(out);
        for item in self {
            item.encode_to(out);
        }
    }
}

macro_rules! encode_fixed {
    ($($name:ty),*) => {
        $(impl Encode for $name {
            fn encode_to(&self, out: &mut Vec<u8>) {
                self.as_bytes().encode_to(out);
            }
        })*
    };
}

encode_fixed!(Address, AssetId, ContractId, Nonce, TxId);

impl Encode for UtxoId {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.tx_id.encode_to(out);
        self.output_index.encode_to(out);
    }
}

impl Encode for TxPointer {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.block_height.encode_to(out);
        self.tx_index.encode_to(out);
    }
}

impl Encode for CoinInput {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.utxo_id.encode_to(out);
        self.owner.encode_to(out);
        self.amount.encode_to(out);
        self.asset_id.encode_to(out);
        self.tx_pointer.encode_to(out);
        self.witness_index.encode_to(out);
        self.predicate_gas_used.encode_to(out);
        self.predicate.as_slice().encode_to(out);
        self.predicate_data.as_slice().encode_to(out);
    }
}

impl Encode for MessageInput {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.sender.encode_to(out);
        self.recipient.encode_to(out);
        self.amount.encode_to(out);
        self.nonce.encode_to(out);
        self.witness_index.encode_to(out);
        self.predicate_gas_used.encode_to(out);
        self.data.as_slice().encode_to(out);
        self.predicate.as_slice().encode_to(out);
        self.predicate_data.as_slice().encode_to(out);
    }
}

impl Encode for ContractInput {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.utxo_id.encode_to(out);
        self.balance_root.encode_to(out);
        self.state_root.encode_to(out);
        self.tx_pointer.encode_to(out);
        self.contract_id.encode_to(out);
    }
}

impl Encode for Input {
    fn encode_to(&self, out: &mut Vec<u8>) {
        match self {
            Input::Coin(coin) => {
                INPUT_COIN.encode_to(out);
                coin.encode_to(out);
            }
            Input::Contract(contract) => {
                INPUT_CONTRACT.encode_to(out);
                contract.encode_to(out);
            }
            Input::Message(message) => {
                INPUT_MESSAGE.encode_to(out);
                message.encode_to(out);
            }
        }
    }
}

impl Encode for Output {
    fn encode_to(&self, out: &mut Vec<u8>) {
        match self {
            Output::Coin {
                to,
                amount,
                asset_id,
            } => {
                OUTPUT_COIN.encode_to(out);
                to.encode_to(out);
                amount.encode_to(out);
                asset_id.encode_to(out);
            }
            Output::Contract {
                input_index,
                balance_root,
                state_root,
            } => {
                OUTPUT_CONTRACT.encode_to(out);
                input_index.encode_to(out);
                balance_root.encode_to(out);
                state_root.encode_to(out);
            }
            Output::Change {
                to,
                amount,
                asset_id,
            } => {
                OUTPUT_CHANGE.encode_to(out);
                to.encode_to(out);
                amount.encode_to(out);
                asset_id.encode_to(out);
            }
            Output::Variable {
                to,
                amount,
                asset_id,
            } => {
                OUTPUT_VARIABLE.encode_to(out);
                to.encode_to(out);
                amount.encode_to(out);
                asset_id.encode_to(out);
            }
        }
    }
}

impl Encode for Witness {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.as_bytes().encode_to(out);
    }
}

impl Encode for TransactionRequest {
    fn encode_to(&self, out: &mut Vec<u8>) {
        TX_SCRIPT.encode_to(out);
        self.script_gas_limit.encode_to(out);
        self.tip.encode_to(out);
        self.maturity.encode_to(out);
        self.max_fee.encode_to(out);
        self.script.as_slice().encode_to(out);
        self.script_data.as_slice().encode_to(out);
        self.inputs.encode_to(out);
        self.outputs.encode_to(out);
        self.witnesses.encode_to(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_big_endian() {
        assert_eq!(0x0102u16.to_bytes(), vec![0x01, 0x02]);
        assert_eq!(1u64.to_bytes(), vec![0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn byte_strings_are_length_prefixed() {
        let encoded = [0xaau8, 0xbb].as_slice().to_bytes();
        assert_eq!(encoded, vec![0, 0, 0, 0, 0, 0, 0, 2, 0xaa, 0xbb]);
    }

    #[test]
    fn empty_transaction_layout() {
        let encoded = TransactionRequest::new().to_bytes();
        // tag, gas limit, tip, maturity, max fee, then five empty length prefixes
        assert_eq!(encoded.len(), 1 + 8 + 8 + 4 + 8 + 5 * 8);
        assert!(encoded.iter().all(|b| *b == 0));
    }

    #[test]
    fn witnesses_are_part_of_full_encoding() {
        let mut tx = TransactionRequest::new();
        let bare = tx.to_bytes();
        tx.add_witness(Witness(vec![1, 2, 3])).unwrap();
        assert_ne!(tx.to_bytes(), bare);
    }

    #[test]
    fn input_variants_are_tagged() {
        let coin = Input::Coin(CoinInput::default()).to_bytes();
        let contract = Input::Contract(ContractInput::default()).to_bytes();
        let message = Input::Message(MessageInput::default()).to_bytes();
        assert_eq!(coin[0], INPUT_COIN);
        assert_eq!(contract[0], INPUT_CONTRACT);
        assert_eq!(message[0], INPUT_MESSAGE);
    }
}
