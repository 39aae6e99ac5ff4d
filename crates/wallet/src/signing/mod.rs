mod message;
mod secp256k1;

pub use message::{MESSAGE_PREFIX, hash_message, recover_message_address};
pub use secp256k1::{PublicKey, Secp256k1Signer, recover_address, recover_public_key};
