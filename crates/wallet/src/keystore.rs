use crate::types::Address;

/// Turns key material into an opaque encrypted blob.
///
/// The file format belongs to the implementation.
pub trait KeystoreEncryptor: Send + Sync {
    fn encrypt(
        &self,
        private_key: &[u8; 32],
        address: &Address,
        password: &str,
    ) -> anyhow::Result<Vec<u8>>;
}
