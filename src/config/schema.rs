//! Configuration schema definitions.
//!
//! A run is driven by one immutable [`TransferConfig`]. The loader builds it
//! from the process environment and it is handed to every component by
//! reference.

use alloy::primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::bridge::address::ChainKind;

/// Chain the tokens leave from.
pub const SOURCE_CHAIN: ChainKind = ChainKind::Base;

/// Chain the tokens arrive on.
pub const DESTINATION_CHAIN: ChainKind = ChainKind::Near;

/// Root configuration for a single transfer.
#[derive(Clone)]
pub struct TransferConfig {
    /// JSON-RPC endpoint of the source chain.
    pub rpc_url: String,

    /// Hex-encoded signing key. Never logged.
    pub private_key: String,

    /// ERC-20 token contract on the source chain.
    pub token_address: String,

    /// Destination account on NEAR.
    pub near_account_id: String,

    /// Amount in the token's base units. Always greater than zero.
    pub amount: U256,

    /// Bridge deployment to talk to.
    pub network: Network,

    /// Relayer API and bridge contract settings.
    pub bridge: BridgeConfig,

    /// Retry policy for the fee quote.
    pub retries: RetryConfig,

    /// Timeout for each RPC or HTTP request, in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum wait for a broadcast transaction to be included, in seconds.
    pub receipt_timeout_secs: u64,
}

impl TransferConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}

/// Custom Debug that redacts the private key.
impl fmt::Debug for TransferConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("token_address", &self.token_address)
            .field("near_account_id", &self.near_account_id)
            .field("amount", &self.amount)
            .field("network", &self.network)
            .field("bridge", &self.bridge)
            .field("retries", &self.retries)
            .field("rpc_timeout_secs", &self.rpc_timeout_secs)
            .field("receipt_timeout_secs", &self.receipt_timeout_secs)
            .finish()
    }
}

/// Omni Bridge deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Relayer API base URL for this deployment.
    pub fn default_api_url(self) -> &'static str {
        match self {
            Network::Mainnet => "https://mainnet.api.bridge.nearone.org",
            Network::Testnet => "https://testnet.api.bridge.nearone.org",
        }
    }

    /// OmniBridge contract on Base for this deployment.
    pub fn default_bridge_address(self) -> Address {
        match self {
            Network::Mainnet => address!("d025b38762b4a4e36f0cde483b86cb13ea00d989"),
            Network::Testnet => address!("a56b860017152cd296ad723e8409abd6e5d86d4d"),
        }
    }

    /// EIP-155 chain id of Base (mainnet) or Base Sepolia (testnet).
    pub fn source_chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 8453,
            Network::Testnet => 84532,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(format!("unknown network '{}' (expected mainnet or testnet)", other)),
        }
    }
}

/// Relayer API and bridge contract settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Base URL of the relayer API (no trailing slash).
    pub api_url: String,

    /// OmniBridge contract on the source chain.
    pub contract_address: Address,
}

impl BridgeConfig {
    /// Settings for a deployment with no overrides.
    pub fn for_network(network: Network) -> Self {
        Self {
            api_url: network.default_api_url().to_string(),
            contract_address: network.default_bridge_address(),
        }
    }
}

/// Retry configuration for the fee quote.
///
/// Submission is never retried: a second broadcast is a second transfer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Extra attempts after the first failure. Zero disables retries.
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 250,
            max_delay_ms: 2000,
        }
    }
}

pub(crate) fn default_rpc_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_receipt_timeout_secs() -> u64 {
    120
}
