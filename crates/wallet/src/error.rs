use crate::types::Address;

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),
    #[error("Invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidInput { expected: usize, actual: usize },
    #[error("Address {0} owns no input in the transaction")]
    UnknownOwner(Address),
    #[error(
        "Inputs owned by {owner} name conflicting witness slots: {first} and {conflicting}"
    )]
    ConflictingWitnessSlots {
        owner: Address,
        first: u16,
        conflicting: u16,
    },
    #[error("Too many {kind}: index {index} does not fit in u16")]
    IndexOverflow { kind: &'static str, index: usize },
    #[error("Key belongs to {actual}, expected {expected}")]
    AddressMismatch { expected: Address, actual: Address },
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    #[error("Failed to parse value: {0}")]
    Parse(String),
    #[error(transparent)]
    Provider(anyhow::Error),
    #[error(transparent)]
    Keystore(anyhow::Error),
}

impl From<hex::FromHexError> for WalletError {
    fn from(error: hex::FromHexError) -> Self {
        Self::Parse(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
