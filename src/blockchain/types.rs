//! Chain-specific types and error definitions.

use thiserror::Error;

use crate::config::schema::TransferConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Source-chain connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Expected chain ID (8453 for Base, 84532 for Base Sepolia).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum wait for a transaction to be included, in seconds.
    pub receipt_timeout_secs: u64,
}

impl From<&TransferConfig> for BlockchainConfig {
    fn from(config: &TransferConfig) -> Self {
        Self {
            rpc_url: config.rpc_url.clone(),
            chain_id: config.network.source_chain_id(),
            rpc_timeout_secs: config.rpc_timeout_secs,
            receipt_timeout_secs: config.receipt_timeout_secs,
        }
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not included within the allowed time.
    #[error("Transaction {tx_hash} not included after {secs} seconds")]
    InclusionTimeout { tx_hash: String, secs: u64 },

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Building, signing, or broadcasting a transaction failed.
    #[error("Submission error: {0}")]
    Submission(String),

    /// A value does not fit the contract's integer width.
    #[error("{field} {value} does not fit in uint128")]
    AmountOverflow { field: &'static str, value: String },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
