pub mod config;
pub mod error;
pub mod keystore;
pub mod provider;
pub mod signing;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use config::TxOptions;
pub use error::{Result, WalletError};
pub use keystore::KeystoreEncryptor;
pub use provider::{Provider, SimulateParams, SubmitParams};
pub use signing::{PublicKey, Secp256k1Signer};
pub use transaction::TransactionRequest;
pub use types::{Address, Signature};
pub use wallet::{WalletLocked, WalletUnlocked};
