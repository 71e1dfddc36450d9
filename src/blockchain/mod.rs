//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! TransferConfig (private key, RPC URL)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → contracts.rs (ERC-20 and OmniBridge bindings)
//!     → transaction.rs (wait for inclusion, decode bridge events)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contracts;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
pub use wallet::Wallet;
