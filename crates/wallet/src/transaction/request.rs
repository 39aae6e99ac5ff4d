use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};
use crate::types::{Address, AssetId, Bytes32, ContractId, Nonce, Signature, TxId};

use super::digest::transaction_id;
use super::witness::resolve_witness_index;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtxoId {
    pub tx_id: TxId,
    pub output_index: u16,
}

/// Location of the transaction that created an input, filled in by the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxPointer {
    pub block_height: u32,
    pub tx_index: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinInput {
    pub utxo_id: UtxoId,
    pub owner: Address,
    pub amount: u64,
    pub asset_id: AssetId,
    pub tx_pointer: TxPointer,
    pub witness_index: u16,
    pub predicate_gas_used: u64,
    pub predicate: Vec<u8>,
    pub predicate_data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInput {
    pub sender: Address,
    pub recipient: Address,
    pub amount: u64,
    pub nonce: Nonce,
    pub witness_index: u16,
    pub predicate_gas_used: u64,
    pub data: Vec<u8>,
    pub predicate: Vec<u8>,
    pub predicate_data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInput {
    pub utxo_id: UtxoId,
    pub balance_root: Bytes32,
    pub state_root: Bytes32,
    pub tx_pointer: TxPointer,
    pub contract_id: ContractId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    Coin(CoinInput),
    Message(MessageInput),
    Contract(ContractInput),
}

impl Input {
    /// Address the input belongs to; the recipient for messages.
    pub fn owner(&self) -> Option<Address> {
        match self {
            Input::Coin(coin) => Some(coin.owner),
            Input::Message(message) => Some(message.recipient),
            Input::Contract(_) => None,
        }
    }

    /// `true` when a predicate, not a signature, authorises the spend.
    pub fn is_predicate(&self) -> bool {
        match self {
            Input::Coin(coin) => !coin.predicate.is_empty(),
            Input::Message(message) => !message.predicate.is_empty(),
            Input::Contract(_) => false,
        }
    }

    /// Witness slot this input is authorised by, if it uses one at all.
    pub fn witness_index(&self) -> Option<u16> {
        if self.is_predicate() {
            return None;
        }
        match self {
            Input::Coin(coin) => Some(coin.witness_index),
            Input::Message(message) => Some(message.witness_index),
            Input::Contract(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Output {
    Coin {
        to: Address,
        amount: u64,
        asset_id: AssetId,
    },
    Contract {
        input_index: u16,
        balance_root: Bytes32,
        state_root: Bytes32,
    },
    /// Receives whatever is left of `asset_id`; the node sets `amount`.
    Change {
        to: Address,
        amount: u64,
        asset_id: AssetId,
    },
    /// Set by script execution; the node sets all fields.
    Variable {
        to: Address,
        amount: u64,
        asset_id: AssetId,
    },
}

/// One entry of the witness list. An empty blob is an unfilled slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness(pub Vec<u8>);

impl Witness {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Signature> for Witness {
    fn from(signature: Signature) -> Self {
        Self(signature.as_bytes().to_vec())
    }
}

/// A spendable coin, as returned by a resource query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub utxo_id: UtxoId,
    pub owner: Address,
    pub amount: u64,
    pub asset_id: AssetId,
    pub tx_pointer: TxPointer,
}

/// A spendable message, as returned by a resource query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCoin {
    pub sender: Address,
    pub recipient: Address,
    pub amount: u64,
    pub nonce: Nonce,
    pub data: Vec<u8>,
}

/// Script transaction under construction.
///
/// Callers own the single-writer discipline: every operation that changes
/// inputs or witnesses takes `&mut self`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub tip: u64,
    pub maturity: u32,
    pub max_fee: u64,
    pub script_gas_limit: u64,
    pub script: Vec<u8>,
    pub script_data: Vec<u8>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub witnesses: Vec<Witness>,
}

impl TransactionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, script: Vec<u8>, script_data: Vec<u8>) -> Self {
        self.script = script;
        self.script_data = script_data;
        self
    }

    pub fn with_script_gas_limit(mut self, script_gas_limit: u64) -> Self {
        self.script_gas_limit = script_gas_limit;
        self
    }

    pub fn with_tip(mut self, tip: u64) -> Self {
        self.tip = tip;
        self
    }

    pub fn with_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    pub fn with_maturity(mut self, maturity: u32) -> Self {
        self.maturity = maturity;
        self
    }

    /// Append a witness and return its slot.
    ///
    /// Fails without touching the list once every `u16` slot is taken.
    pub fn add_witness(&mut self, witness: Witness) -> Result<u16> {
        let index = next_index(self.witnesses.len(), "witnesses")?;
        self.witnesses.push(witness);
        Ok(index)
    }

    /// Overwrite slot `index`, padding any gap with empty witnesses.
    pub fn set_witness(&mut self, index: u16, witness: Witness) {
        let index = usize::from(index);
        if self.witnesses.len() <= index {
            self.witnesses.resize(index + 1, Witness::default());
        }
        self.witnesses[index] = witness;
    }

    /// Slot already assigned to `owner`, or a new empty one.
    fn witness_slot_for(&mut self, owner: Address) -> Result<u16> {
        match resolve_witness_index(self, &owner) {
            Some(index) => Ok(index),
            None => self.add_witness(Witness::default()),
        }
    }

    pub fn add_coin_input(&mut self, coin: Coin) -> Result<()> {
        let witness_index = self.witness_slot_for(coin.owner)?;
        self.inputs.push(Input::Coin(CoinInput {
            utxo_id: coin.utxo_id,
            owner: coin.owner,
            amount: coin.amount,
            asset_id: coin.asset_id,
            tx_pointer: coin.tx_pointer,
            witness_index,
            ..Default::default()
        }));
        Ok(())
    }

    pub fn add_message_input(&mut self, message: MessageCoin) -> Result<()> {
        let witness_index = self.witness_slot_for(message.recipient)?;
        self.inputs.push(Input::Message(MessageInput {
            sender: message.sender,
            recipient: message.recipient,
            amount: message.amount,
            nonce: message.nonce,
            witness_index,
            data: message.data,
            ..Default::default()
        }));
        Ok(())
    }

    /// Add a contract input and the output that must mirror it.
    pub fn add_contract_input_and_output(&mut self, contract_id: ContractId) -> Result<()> {
        let already_present = self
            .inputs
            .iter()
            .any(|input| matches!(input, Input::Contract(c) if c.contract_id == contract_id));
        if already_present {
            return Ok(());
        }
        let input_index = next_index(self.inputs.len(), "inputs")?;
        self.inputs.push(Input::Contract(ContractInput {
            contract_id,
            ..Default::default()
        }));
        self.outputs.push(Output::Contract {
            input_index,
            balance_root: [0u8; 32],
            state_root: [0u8; 32],
        });
        Ok(())
    }

    pub fn add_coin_output(&mut self, to: Address, amount: u64, asset_id: AssetId) {
        self.outputs.push(Output::Coin {
            to,
            amount,
            asset_id,
        });
    }

    /// Add a change output unless one for `asset_id` already exists.
    pub fn add_change_output(&mut self, to: Address, asset_id: AssetId) {
        let exists = self
            .outputs
            .iter()
            .any(|output| matches!(output, Output::Change { asset_id: a, .. } if *a == asset_id));
        if !exists {
            self.outputs.push(Output::Change {
                to,
                amount: 0,
                asset_id,
            });
        }
    }

    /// Chain-bound identifier; this is the digest owners sign.
    pub fn transaction_id(&self, chain_id: u64) -> TxId {
        transaction_id(self, chain_id)
    }
}

/// Index the next element of a list of `len` would get.
fn next_index(len: usize, kind: &'static str) -> Result<u16> {
    u16::try_from(len).map_err(|_| WalletError::IndexOverflow { kind, index: len })
}
