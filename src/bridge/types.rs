//! Transfer data carried through one workflow run.

use alloy::primitives::{TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::bridge::address::OmniAddress;

/// What the user asked to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: OmniAddress,
    pub token: OmniAddress,
    pub recipient: OmniAddress,
    /// Amount in the token's base units.
    pub amount: U256,
}

/// Fees quoted by the relayer for one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeQuote {
    /// Fee in the transferred token's base units.
    pub token_fee: U256,
    /// Fee in the source chain's native asset (wei).
    pub native_fee: U256,
}

/// Exact payload handed to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedTransfer {
    pub token: OmniAddress,
    pub recipient: OmniAddress,
    pub amount: U256,
    pub fee: U256,
    pub native_fee: U256,
}

impl PreparedTransfer {
    /// Combine a request with its quote. Values are copied as-is.
    pub fn new(request: &TransferRequest, quote: &FeeQuote) -> Self {
        Self {
            token: request.token.clone(),
            recipient: request.recipient.clone(),
            amount: request.amount,
            fee: quote.token_fee,
            native_fee: quote.native_fee,
        }
    }
}

/// Outcome of a broadcast transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub transaction_hash: TxHash,
    /// Nonce the bridge assigned to this transfer (not the account nonce).
    pub relayer_nonce: u64,
}
