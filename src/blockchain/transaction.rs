//! Broadcast transaction tracking.
//!
//! # Responsibilities
//! - Wait for a broadcast transaction to be included in a block
//! - Turn reverts and missing receipts into errors
//! - Pull the bridge's transfer nonce out of the receipt logs
//!
//! Inclusion is not finality; nothing here waits for confirmations.

use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::providers::PendingTransactionBuilder;
use alloy::rpc::types::{Log, TransactionReceipt};
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::contracts::IOmniBridge;
use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Wait until `pending` is included and succeeded.
///
/// # Arguments
/// * `pending` - Transaction returned by a contract `send()`
/// * `timeout_secs` - Maximum time to wait for the receipt
pub async fn wait_for_inclusion(
    pending: PendingTransactionBuilder<Ethereum>,
    timeout_secs: u64,
) -> BlockchainResult<TransactionReceipt> {
    let tx_hash = *pending.tx_hash();

    let receipt = match timeout(Duration::from_secs(timeout_secs), pending.get_receipt()).await {
        Ok(Ok(receipt)) => receipt,
        Ok(Err(e)) => {
            return Err(BlockchainError::Rpc(format!(
                "Failed to get receipt for 0x{:x}: {}",
                tx_hash, e
            )))
        }
        Err(_) => {
            return Err(BlockchainError::InclusionTimeout {
                tx_hash: format!("0x{:x}", tx_hash),
                secs: timeout_secs,
            })
        }
    };

    if !receipt.status() {
        return Err(BlockchainError::Reverted(format!("0x{:x}", tx_hash)));
    }

    tracing::debug!(
        tx_hash = %tx_hash,
        block_number = ?receipt.block_number,
        gas_used = receipt.gas_used,
        "Transaction included"
    );

    Ok(receipt)
}

/// Find the `originNonce` of the `InitTransfer` event emitted by `bridge`.
pub fn find_origin_nonce<'a>(logs: impl IntoIterator<Item = &'a Log>, bridge: Address) -> Option<u64> {
    logs.into_iter()
        .filter(|log| log.address() == bridge)
        .find_map(|log| log.log_decode::<IOmniBridge::InitTransfer>().ok())
        .map(|decoded| decoded.inner.originNonce)
}
