//! Observability subsystem.
//!
//! Diagnostics are `tracing` events written to stderr so that stdout only
//! carries the transfer report.

pub mod logging;

pub use logging::init_logging;
