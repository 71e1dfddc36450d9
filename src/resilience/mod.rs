//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Fee quote request:
//!     → reqwest timeout (per request)
//!     → On retryable failure: retries.rs (bounded retry with backoff.rs delays)
//!
//! Transfer submission:
//!     → RPC timeout only; never retried
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Retries only for idempotent reads
//! - Retries are off unless configured

pub mod backoff;
pub mod retries;

pub use backoff::retry_delay;
pub use retries::retry_with_backoff;
