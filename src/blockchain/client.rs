//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Hold a signing provider for the source chain
//! - Query chain state (chain id)
//! - Bound every RPC call with the configured timeout

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::wallet::Wallet;

/// Blockchain RPC client wrapper.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Provider that fills nonce, gas and signature from the wallet.
    provider: DynProvider,
    /// Configuration.
    config: BlockchainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// No request is made here; the endpoint is first contacted by
    /// [`verify_chain_id`](Self::verify_chain_id).
    pub fn connect(config: BlockchainConfig, wallet: &Wallet) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);

        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url)
            .erased();

        tracing::debug!(
            rpc_url = %config.rpc_url,
            chain_id = config.chain_id,
            "Blockchain client created"
        );

        Ok(Self {
            provider,
            config,
            timeout_duration,
        })
    }

    /// Run an RPC future under the configured timeout.
    pub async fn with_timeout<F>(&self, operation: &'static str, fut: F) -> BlockchainResult<F::Output>
    where
        F: IntoFuture,
    {
        timeout(self.timeout_duration, fut).await.map_err(|_| {
            tracing::warn!(operation, "RPC timeout");
            BlockchainError::Timeout(self.timeout_duration.as_secs())
        })
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_timeout("eth_chainId", self.provider.get_chain_id())
            .await?
            .map(ChainId)
            .map_err(|e| BlockchainError::Rpc(e.to_string()))
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
