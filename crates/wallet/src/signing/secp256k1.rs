use std::fmt;

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, SigningKey, VerifyingKey};
use k256::elliptic_curve::rand_core::CryptoRngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{Result, WalletError};
use crate::types::{Address, Bytes32, Signature, decode_hex_array};

const PRIVATE_KEY_LEN: usize = 32;
const DIGEST_LEN: usize = 32;
const PARITY_BIT: u8 = 0x80;

/// ECDSA key holder on the secp256k1 curve.
///
/// The public key and address are derived once at construction. The secret
/// scalar is never serialized and is zeroized when the signer is dropped.
pub struct Secp256k1Signer {
    signing_key: SigningKey,
    public_key: PublicKey,
    address: Address,
}

impl Secp256k1Signer {
    /// Build a signer from a raw 32-byte big-endian scalar.
    ///
    /// Rejects wrong lengths, zero, and values not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(WalletError::InvalidKey(format!(
                "expected {PRIVATE_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| {
            WalletError::InvalidKey("scalar is zero or not below the curve order".into())
        })?;
        Ok(Self::from_signing_key(signing_key))
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            decode_hex_array::<PRIVATE_KEY_LEN>(s)
                .map_err(|e| WalletError::InvalidKey(e.to_string()))?,
        );
        Self::from_bytes(&bytes[..])
    }

    pub fn generate<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self::from_signing_key(SigningKey::random(rng))
    }

    /// Fresh key from the operating system's CSPRNG.
    pub fn random() -> Self {
        Self::generate(&mut rand::rngs::OsRng)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = PublicKey(signing_key.verifying_key().clone());
        let address = public_key.address();
        Self {
            signing_key,
            public_key,
            address,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key.clone()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Raw scalar, for handing to a keystore encryptor.
    pub fn private_key(&self) -> Zeroizing<[u8; PRIVATE_KEY_LEN]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// Sign a 32-byte prehashed digest.
    pub fn sign_digest(&self, digest: &[u8]) -> Result<Signature> {
        let digest: &Bytes32 = digest.try_into().map_err(|_| WalletError::InvalidInput {
            expected: DIGEST_LEN,
            actual: digest.len(),
        })?;

        let (mut signature, mut recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| WalletError::InvalidSignature(format!("signing failed: {e}")))?;

        // The parity bit only fits in `s` when `s` is in the lower half.
        if let Some(normalized) = signature.normalize_s() {
            signature = normalized;
            recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
        }

        let mut bytes = [0u8; Signature::LEN];
        bytes.copy_from_slice(&signature.to_bytes());
        if recovery_id.is_y_odd() {
            bytes[32] |= PARITY_BIT;
        }
        Ok(Signature::new(bytes))
    }
}

impl fmt::Debug for Secp256k1Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// secp256k1 public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Parse the 64-byte `x || y` form.
    pub fn from_uncompressed(bytes: &[u8; 64]) -> Result<Self> {
        let mut sec1 = [0u8; 65];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(bytes);
        VerifyingKey::from_sec1_bytes(&sec1)
            .map(Self)
            .map_err(|_| WalletError::Parse("point is not on the curve".into()))
    }

    /// `x || y`, without the SEC1 tag byte.
    pub fn uncompressed(&self) -> [u8; 64] {
        let point = self.0.to_encoded_point(false);
        let mut out = [0u8; 64];
        out.copy_from_slice(&point.as_bytes()[1..]);
        out
    }

    pub fn compressed(&self) -> [u8; 33] {
        let point = self.0.to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    pub fn address(&self) -> Address {
        Address::new(Sha256::digest(self.uncompressed()).into())
    }

    /// Check `signature` over `digest` against this key.
    pub fn verify(&self, digest: &Bytes32, signature: &Signature) -> bool {
        split_signature(signature)
            .map(|(signature, _)| self.0.verify_prehash(digest, &signature).is_ok())
            .unwrap_or(false)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.uncompressed()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

fn split_signature(signature: &Signature) -> Result<(k256::ecdsa::Signature, RecoveryId)> {
    let mut bytes = *signature.as_bytes();
    let is_y_odd = bytes[32] & PARITY_BIT != 0;
    bytes[32] &= !PARITY_BIT;
    let signature = k256::ecdsa::Signature::from_slice(&bytes)
        .map_err(|e| WalletError::InvalidSignature(e.to_string()))?;
    Ok((signature, RecoveryId::new(is_y_odd, false)))
}

pub fn recover_public_key(digest: &Bytes32, signature: &Signature) -> Result<PublicKey> {
    let (signature, recovery_id) = split_signature(signature)?;
    VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        .map(PublicKey)
        .map_err(|e| WalletError::InvalidSignature(e.to_string()))
}

pub fn recover_address(digest: &Bytes32, signature: &Signature) -> Result<Address> {
    recover_public_key(digest, signature).map(|key| key.address())
}
