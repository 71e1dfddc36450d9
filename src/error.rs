//! Top-level error taxonomy.
//!
//! Every failure ends the run. The variant says which stage failed; the
//! process exit code is the same for all of them.

use thiserror::Error;

use crate::blockchain::types::BlockchainError;
use crate::bridge::fee::FeeError;
use crate::config::loader::ConfigError;
use crate::workflow::Stage;

/// Exit status for any failed run.
pub const FAILURE_EXIT_CODE: u8 = 1;

#[derive(Debug, Error)]
pub enum TransferError {
    /// Required values missing or invalid; nothing was sent anywhere.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The fee service could not produce a quote.
    #[error("fee quote failed: {0}")]
    FeeQuote(#[from] FeeError),

    /// Signing, broadcasting, or inclusion failed.
    #[error("submission failed: {0}")]
    Submission(#[from] BlockchainError),

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl TransferError {
    /// Workflow stage the error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            TransferError::Config(_) => Stage::Validating,
            TransferError::FeeQuote(_) => Stage::QuotingFee,
            TransferError::Submission(_) => Stage::Submitting,
            TransferError::Report(_) => Stage::Reported,
        }
    }

    pub fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }

    /// The error followed by each of its sources, one per line.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str("\n  caused by: ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}
