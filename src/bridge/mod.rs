//! Bridge collaborators.
//!
//! # Data Flow
//! ```text
//! native addresses
//!     → address.rs (chain-tagged canonical form)
//!     → fee.rs (relayer quote: token fee + native fee)
//!     → types.rs (PreparedTransfer = request + quote)
//!     → submit.rs (approve + initTransfer on the source chain)
//! ```
//!
//! `FeeOracle` and `TransferSubmitter` are the seams the workflow is
//! written against; tests swap in doubles.

pub mod address;
pub mod fee;
pub mod submit;
pub mod types;

pub use address::{omni_address, ChainKind, OmniAddress};
pub use fee::{FeeError, FeeOracle, OmniBridgeApi};
pub use submit::{EvmTransferSubmitter, TransferSubmitter};
pub use types::{FeeQuote, PreparedTransfer, TransferRequest, TransferResult};
