use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::types::{Address, Bytes32, Signature};

use super::secp256k1::recover_address;

/// Prefix separating signed messages from transaction digests.
pub const MESSAGE_PREFIX: &[u8] = b"\x19Fuel Signed Message:\n";

/// Digest signed by `sign_message`.
///
/// `SHA-256(prefix || decimal length || message)`. Transaction digests start
/// with the 8-byte chain id instead, so a message can never collide with a
/// transaction even when the payload bytes coincide.
pub fn hash_message(message: &[u8]) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(MESSAGE_PREFIX);
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Address that produced `signature` over `message`.
pub fn recover_message_address(message: &[u8], signature: &Signature) -> Result<Address> {
    recover_address(&hash_message(message), signature)
}
