use serde::{Deserialize, Serialize};

/// Knobs for `send_transaction` and `simulate_transaction`.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxOptions {
    /// Let the provider fill in missing inputs/outputs before signing.
    pub estimate_tx_dependencies: bool,
    /// Wait for the transaction to execute before `submit` returns.
    pub await_execution: bool,
    /// Validate UTXOs during simulation.
    pub utxo_validation: bool,
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            estimate_tx_dependencies: true,
            await_execution: false,
            utxo_validation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let options = TxOptions::default();
        assert!(options.estimate_tx_dependencies);
        assert!(!options.await_execution);
        assert!(options.utxo_validation);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let options: TxOptions = serde_json::from_value(json!({"await_execution": true})).unwrap();
        assert!(options.await_execution);
        assert!(options.estimate_tx_dependencies);
        assert!(options.utxo_validation);
    }
}
