//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global subscriber once per process
//! - Honor `RUST_LOG`, falling back to a crate-level default
//!
//! # Design Decisions
//! - Human-readable format on stderr; stdout is reserved for the report
//! - Secrets never reach a log call site (see `TransferConfig`'s `Debug`)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "omni_transfer=info";

/// Build the filter from `RUST_LOG`, or from `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(default_directive: &str) {
    let installed = tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Subscriber already installed, keeping it");
    }
}
