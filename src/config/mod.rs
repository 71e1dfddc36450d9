//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional) + process environment
//!     → loader.rs (presence check, parse)
//!     → validation.rs (semantic checks)
//!     → TransferConfig (validated, immutable)
//!     → passed by reference to the workflow and its collaborators
//! ```
//!
//! # Design Decisions
//! - Every missing required key is reported at once, before any network call
//! - Optional keys have defaults so the five required ones are enough
//! - Validation separates parsing from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, load_from_lookup, ConfigError, REQUIRED_VARS};
pub use schema::{BridgeConfig, Network, RetryConfig, TransferConfig};
pub use validation::ValidationError;
