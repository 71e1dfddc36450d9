//! Transfer submission on the source chain.
//!
//! Submitting is not idempotent: every call broadcasts a new transaction and
//! starts a new transfer. Callers must not retry it.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::contracts::{IOmniBridge, IERC20};
use crate::blockchain::transaction::{find_origin_nonce, wait_for_inclusion};
use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;
use crate::bridge::types::{PreparedTransfer, TransferResult};
use crate::config::schema::TransferConfig;

/// Broadcasts bridge transfers.
#[async_trait]
pub trait TransferSubmitter: Send + Sync {
    /// Native address of the account that signs transfers.
    fn sender(&self) -> String;

    /// Sign and broadcast one transfer.
    async fn submit(&self, transfer: &PreparedTransfer) -> BlockchainResult<TransferResult>;
}

/// Submitter for the OmniBridge contract on an EVM chain.
#[derive(Debug, Clone)]
pub struct EvmTransferSubmitter {
    client: BlockchainClient,
    wallet: Wallet,
    bridge_address: Address,
}

impl EvmTransferSubmitter {
    /// Build a submitter from configuration. No request is made.
    pub fn new(config: &TransferConfig, wallet: Wallet) -> BlockchainResult<Self> {
        let client = BlockchainClient::connect(BlockchainConfig::from(config), &wallet)?;
        Ok(Self {
            client,
            wallet,
            bridge_address: config.bridge.contract_address,
        })
    }

    /// Make sure the bridge may pull `amount` of `token` from the wallet.
    async fn ensure_allowance(&self, token: Address, amount: U256) -> BlockchainResult<()> {
        let erc20 = IERC20::new(token, self.client.provider().clone());
        let owner = self.wallet.address();

        let current = self
            .client
            .with_timeout("allowance", erc20.allowance(owner, self.bridge_address).call())
            .await?
            .map_err(|e| BlockchainError::Rpc(format!("allowance query failed: {}", e)))?;

        if current >= amount {
            tracing::debug!(token = %token, allowance = %current, "Allowance sufficient");
            return Ok(());
        }

        tracing::info!(
            token = %token,
            spender = %self.bridge_address,
            amount = %amount,
            "Approving bridge to spend tokens"
        );

        let pending = self
            .client
            .with_timeout("approve", erc20.approve(self.bridge_address, amount).send())
            .await?
            .map_err(|e| BlockchainError::Submission(format!("approve failed: {}", e)))?;

        wait_for_inclusion(pending, self.client.config().receipt_timeout_secs).await?;
        Ok(())
    }
}

#[async_trait]
impl TransferSubmitter for EvmTransferSubmitter {
    fn sender(&self) -> String {
        self.wallet.address().to_string()
    }

    async fn submit(&self, transfer: &PreparedTransfer) -> BlockchainResult<TransferResult> {
        self.client.verify_chain_id().await?;

        if !transfer.token.chain().is_evm() {
            return Err(BlockchainError::Submission(format!(
                "token {} is not on an EVM chain",
                transfer.token
            )));
        }
        let token: Address = transfer.token.address().parse().map_err(|e| {
            BlockchainError::Submission(format!(
                "invalid token address '{}': {}",
                transfer.token.address(),
                e
            ))
        })?;

        let amount = to_uint128("amount", transfer.amount)?;
        let fee = to_uint128("fee", transfer.fee)?;
        let native_fee = to_uint128("native fee", transfer.native_fee)?;

        // The zero address stands for the chain's native asset, which travels
        // as value instead of through an allowance.
        let value = if token == Address::ZERO {
            transfer.amount + transfer.native_fee
        } else {
            self.ensure_allowance(token, transfer.amount).await?;
            transfer.native_fee
        };

        let bridge = IOmniBridge::new(self.bridge_address, self.client.provider().clone());
        let call = bridge
            .initTransfer(
                token,
                amount,
                fee,
                native_fee,
                transfer.recipient.to_string(),
                String::new(),
            )
            .value(value);

        tracing::debug!(
            token = %token,
            amount = %transfer.amount,
            fee = %transfer.fee,
            native_fee = %transfer.native_fee,
            recipient = %transfer.recipient,
            "Submitting initTransfer"
        );

        let pending = self
            .client
            .with_timeout("initTransfer", call.send())
            .await?
            .map_err(|e| BlockchainError::Submission(format!("initTransfer failed: {}", e)))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Transaction sent, waiting for inclusion");

        let receipt = wait_for_inclusion(pending, self.client.config().receipt_timeout_secs).await?;

        let relayer_nonce = find_origin_nonce(receipt.inner.logs(), self.bridge_address)
            .ok_or_else(|| {
                BlockchainError::Submission(format!(
                    "no InitTransfer event in receipt of 0x{:x}",
                    tx_hash
                ))
            })?;

        Ok(TransferResult {
            transaction_hash: tx_hash,
            relayer_nonce,
        })
    }
}

/// Narrow an amount to the contract's `uint128`, refusing to truncate.
fn to_uint128(field: &'static str, value: U256) -> BlockchainResult<u128> {
    u128::try_from(value).map_err(|_| BlockchainError::AmountOverflow {
        field,
        value: value.to_string(),
    })
}
