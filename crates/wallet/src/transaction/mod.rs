//! Transaction model, canonical encoding, signing digest and witness placement.

mod digest;
mod encoding;
mod request;
mod witness;

pub use digest::{compute_signing_digest, signable_view, transaction_id};
pub use encoding::Encode;
pub use request::{
    Coin, CoinInput, ContractInput, Input, MessageCoin, MessageInput, Output, TransactionRequest,
    TxPointer, UtxoId, Witness,
};
pub use witness::{resolve_witness_index, set_witness_at_owner};
