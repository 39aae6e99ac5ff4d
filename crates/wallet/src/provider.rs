use std::sync::Arc;

use async_trait::async_trait;

use crate::transaction::TransactionRequest;

/// Flags passed along with a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitParams {
    pub await_execution: bool,
    /// Always `false` from the wallet: estimation after signing would
    /// invalidate the witnesses.
    pub estimate_tx_dependencies: bool,
}

/// Flags passed along with a dry run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulateParams {
    pub utxo_validation: bool,
    pub estimate_tx_dependencies: bool,
}

/// Network-facing collaborator of the wallet.
///
/// Errors are returned as-is to the wallet's caller; retry policy, if any,
/// lives in the implementation.
#[async_trait]
pub trait Provider: Send + Sync {
    type Response: Send;
    type CallResult: Send;

    async fn chain_id(&self) -> anyhow::Result<u64>;

    /// May rewrite inputs and outputs of `tx`.
    async fn estimate_tx_dependencies(&self, tx: &mut TransactionRequest) -> anyhow::Result<()>;

    async fn submit(
        &self,
        tx: &TransactionRequest,
        params: SubmitParams,
    ) -> anyhow::Result<Self::Response>;

    async fn simulate(
        &self,
        tx: &TransactionRequest,
        params: SimulateParams,
    ) -> anyhow::Result<Self::CallResult>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Arc<P> {
    type Response = P::Response;
    type CallResult = P::CallResult;

    async fn chain_id(&self) -> anyhow::Result<u64> {
        (**self).chain_id().await
    }

    async fn estimate_tx_dependencies(&self, tx: &mut TransactionRequest) -> anyhow::Result<()> {
        (**self).estimate_tx_dependencies(tx).await
    }

    async fn submit(
        &self,
        tx: &TransactionRequest,
        params: SubmitParams,
    ) -> anyhow::Result<Self::Response> {
        (**self).submit(tx, params).await
    }

    async fn simulate(
        &self,
        tx: &TransactionRequest,
        params: SimulateParams,
    ) -> anyhow::Result<Self::CallResult> {
        (**self).simulate(tx, params).await
    }
}
