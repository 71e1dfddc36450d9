//! Omni transfer library.
//!
//! Moves one amount of an ERC-20 token from Base to a NEAR account through
//! the OmniBridge.
//!
//! # Architecture Overview
//!
//! ```text
//!   environment / .env
//!        │
//!        ▼
//!   ┌──────────┐    ┌───────────────┐    ┌──────────────────┐
//!   │  config  │───▶│   workflow    │───▶│      report      │──▶ stdout
//!   │ (loader) │    │ quote → submit│    └──────────────────┘
//!   └──────────┘    └──────┬────────┘
//!                          │
//!            ┌─────────────┴─────────────┐
//!            ▼                           ▼
//!   ┌─────────────────┐         ┌──────────────────┐
//!   │ bridge::fee     │         │ bridge::submit   │
//!   │ relayer HTTP API│         │ blockchain (EVM) │
//!   └─────────────────┘         └──────────────────┘
//! ```
//!
//! Cross-cutting: `observability` (tracing to stderr) and `resilience`
//! (backoff for the fee quote only).

pub mod blockchain;
pub mod bridge;
pub mod config;
pub mod error;
pub mod observability;
pub mod report;
pub mod resilience;
pub mod workflow;

pub use bridge::{
    omni_address, ChainKind, EvmTransferSubmitter, FeeOracle, FeeQuote, OmniAddress,
    OmniBridgeApi, PreparedTransfer, TransferResult, TransferSubmitter,
};
pub use config::schema::TransferConfig;
pub use error::TransferError;
pub use report::{ConsoleReporter, Reporter};
pub use workflow::{RunMode, Stage, TransferOutcome, TransferWorkflow};
