use std::fmt;

use tracing::{debug, info};

use crate::config::TxOptions;
use crate::error::{Result, WalletError};
use crate::keystore::KeystoreEncryptor;
use crate::provider::{Provider, SimulateParams, SubmitParams};
use crate::signing::{PublicKey, Secp256k1Signer, hash_message};
use crate::transaction::{TransactionRequest, compute_signing_digest, set_witness_at_owner};
use crate::types::{Address, Signature};

/// Wallet holding a private key and a handle to the network.
///
/// Every submission runs `[estimate dependencies] -> witness -> submit` in
/// that order; nothing touches the inputs once the witness is written.
pub struct WalletUnlocked<P> {
    signer: Secp256k1Signer,
    provider: P,
}

impl<P> WalletUnlocked<P> {
    pub fn new(signer: Secp256k1Signer, provider: P) -> Self {
        Self { signer, provider }
    }

    pub fn from_private_key(private_key: &[u8], provider: P) -> Result<Self> {
        Ok(Self::new(Secp256k1Signer::from_bytes(private_key)?, provider))
    }

    pub fn from_hex(private_key: &str, provider: P) -> Result<Self> {
        Ok(Self::new(Secp256k1Signer::from_hex(private_key)?, provider))
    }

    /// Wallet with a freshly generated key.
    pub fn generate(provider: P) -> Self {
        Self::new(Secp256k1Signer::random(), provider)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn public_key(&self) -> PublicKey {
        self.signer.public_key()
    }

    pub fn signer(&self) -> &Secp256k1Signer {
        &self.signer
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Drop the key, keeping only the address.
    pub fn lock(self) -> WalletLocked<P> {
        WalletLocked {
            address: self.signer.address(),
            provider: self.provider,
        }
    }

    /// Sign an arbitrary text message. Never touches the network.
    pub fn sign_message(&self, message: &str) -> Result<Signature> {
        self.signer.sign_digest(&hash_message(message.as_bytes()))
    }

    /// Hand the key to a keystore encryptor.
    pub fn encrypt(&self, password: &str, encryptor: &dyn KeystoreEncryptor) -> Result<Vec<u8>> {
        let private_key = self.signer.private_key();
        encryptor
            .encrypt(&private_key, &self.address(), password)
            .map_err(WalletError::Keystore)
    }
}

impl<P: Provider> WalletUnlocked<P> {
    /// Sign the chain-bound digest of `tx` as it stands now.
    pub async fn sign_transaction(&self, tx: &TransactionRequest) -> Result<Signature> {
        let chain_id = self
            .provider
            .chain_id()
            .await
            .map_err(WalletError::Provider)?;
        let digest = compute_signing_digest(tx, chain_id);
        self.signer.sign_digest(&digest)
    }

    /// Sign `tx` and write the signature into this wallet's witness slot.
    pub async fn populate_witnesses(&self, tx: &mut TransactionRequest) -> Result<()> {
        let signature = self.sign_transaction(tx).await?;
        set_witness_at_owner(tx, &self.address(), &signature)?;
        debug!(address = %self.address(), "transaction witnessed");
        Ok(())
    }

    /// Estimate, witness and commit `tx`.
    ///
    /// On failure `tx` keeps whatever was written to it so far; callers
    /// resubmit it as is or rebuild it if the inputs changed.
    pub async fn send_transaction(
        &self,
        tx: &mut TransactionRequest,
        options: TxOptions,
    ) -> Result<P::Response> {
        self.prepare(tx, options).await?;

        let response = self
            .provider
            .submit(
                tx,
                SubmitParams {
                    await_execution: options.await_execution,
                    estimate_tx_dependencies: false,
                },
            )
            .await
            .map_err(WalletError::Provider)?;
        info!(address = %self.address(), "transaction submitted");
        Ok(response)
    }

    /// Estimate, witness and dry-run `tx` without committing it.
    pub async fn simulate_transaction(
        &self,
        tx: &mut TransactionRequest,
        options: TxOptions,
    ) -> Result<P::CallResult> {
        self.prepare(tx, options).await?;

        let result = self
            .provider
            .simulate(
                tx,
                SimulateParams {
                    utxo_validation: options.utxo_validation,
                    estimate_tx_dependencies: false,
                },
            )
            .await
            .map_err(WalletError::Provider)?;
        info!(address = %self.address(), "transaction simulated");
        Ok(result)
    }

    async fn prepare(&self, tx: &mut TransactionRequest, options: TxOptions) -> Result<()> {
        if options.estimate_tx_dependencies {
            self.provider
                .estimate_tx_dependencies(tx)
                .await
                .map_err(WalletError::Provider)?;
            debug!(inputs = tx.inputs.len(), outputs = tx.outputs.len(), "dependencies estimated");
        }
        self.populate_witnesses(tx).await
    }
}

impl<P> fmt::Debug for WalletUnlocked<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletUnlocked")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Address-only wallet. Cannot sign.
pub struct WalletLocked<P> {
    address: Address,
    provider: P,
}

impl<P> WalletLocked<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self { address, provider }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Attach a key; it must derive this wallet's address.
    pub fn unlock(self, signer: Secp256k1Signer) -> Result<WalletUnlocked<P>> {
        if signer.address() != self.address {
            return Err(WalletError::AddressMismatch {
                expected: self.address,
                actual: signer.address(),
            });
        }
        Ok(WalletUnlocked::new(signer, self.provider))
    }
}

impl<P> fmt::Debug for WalletLocked<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletLocked")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
