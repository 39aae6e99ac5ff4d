//! Fixed-size byte values shared across the crate.
//!
//! All of them print as `0x`-prefixed lowercase hex and parse from hex with or
//! without the prefix. Serde goes through the same hex string form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// A 32-byte SHA-256 digest.
pub type Bytes32 = [u8; 32];

pub(crate) fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], WalletError> {
    let hex_str = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(hex_str)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        WalletError::Parse(format!("expected {N} bytes, got {}", bytes.len()))
    })
}

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub const fn zeroed() -> Self {
                Self([0u8; $len])
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zeroed()
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = WalletError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_hex_array(s).map(Self)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = WalletError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

fixed_bytes!(
    /// Account address: SHA-256 of the owner's 64-byte public key.
    Address,
    32
);
fixed_bytes!(AssetId, 32);
fixed_bytes!(ContractId, 32);
fixed_bytes!(Nonce, 32);
fixed_bytes!(
    /// Identifier of the transaction that produced a UTXO.
    TxId,
    32
);
fixed_bytes!(
    /// Compact secp256k1 signature, `r || s`, with the recovery parity stored
    /// in the most significant bit of `s`.
    Signature,
    64
);
