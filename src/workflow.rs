//! Single-shot transfer workflow.
//!
//! # Stages
//! ```text
//! Idle → Validating → QuotingFee → Submitting → Reported
//!            ↓            ↓            ↓
//!          Failed       Failed       Failed
//! ```
//!
//! Validation happens before a [`TransferConfig`] exists, so by the time
//! [`TransferWorkflow::execute`] runs the configuration is already known to
//! be complete. The fee quote may be retried; submission never is.

use std::fmt;

use crate::bridge::address::omni_address;
use crate::bridge::fee::{FeeError, FeeOracle};
use crate::bridge::submit::TransferSubmitter;
use crate::bridge::types::{FeeQuote, PreparedTransfer, TransferRequest, TransferResult};
use crate::config::schema::{RetryConfig, TransferConfig, DESTINATION_CHAIN, SOURCE_CHAIN};
use crate::error::TransferError;
use crate::report::Reporter;
use crate::resilience::retries::retry_with_backoff;

/// Where a run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    QuotingFee,
    Submitting,
    Reported,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Validating => "validating",
            Stage::QuotingFee => "quoting_fee",
            Stage::Submitting => "submitting",
            Stage::Reported => "reported",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How far a run goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Quote, then submit.
    #[default]
    Submit,
    /// Quote and stop.
    QuoteOnly,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub quote: FeeQuote,
    pub transfer: Option<PreparedTransfer>,
    pub result: Option<TransferResult>,
}

/// Drives one transfer through quote and submission.
pub struct TransferWorkflow<O, S> {
    oracle: O,
    submitter: S,
    retry: RetryConfig,
}

impl<O: FeeOracle, S: TransferSubmitter> TransferWorkflow<O, S> {
    pub fn new(oracle: O, submitter: S, retry: RetryConfig) -> Self {
        Self {
            oracle,
            submitter,
            retry,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Run the workflow once.
    ///
    /// Each call that reaches submission broadcasts a new transfer.
    pub async fn execute<R: Reporter>(
        &self,
        config: &TransferConfig,
        reporter: &mut R,
        mode: RunMode,
    ) -> Result<TransferOutcome, TransferError> {
        let request = TransferRequest {
            sender: omni_address(SOURCE_CHAIN, &self.submitter.sender()),
            token: omni_address(SOURCE_CHAIN, &config.token_address),
            recipient: omni_address(DESTINATION_CHAIN, &config.near_account_id),
            amount: config.amount,
        };

        tracing::info!(stage = %Stage::QuotingFee, token = %request.token, "Requesting fee quote");
        let quote = retry_with_backoff(&self.retry, "fee_quote", FeeError::is_retryable, || {
            self.oracle
                .quote(&request.sender, &request.recipient, &request.token)
        })
        .await
        .map_err(|e| {
            tracing::error!(stage = %Stage::Failed, error = %e, "Fee quote failed");
            e
        })?;

        tracing::debug!(token_fee = %quote.token_fee, native_fee = %quote.native_fee, "Fee quote received");
        reporter.fee_quote(&quote)?;

        if mode == RunMode::QuoteOnly {
            tracing::info!("Quote-only run, nothing submitted");
            return Ok(TransferOutcome {
                quote,
                transfer: None,
                result: None,
            });
        }

        let transfer = PreparedTransfer::new(&request, &quote);

        tracing::info!(
            stage = %Stage::Submitting,
            amount = %transfer.amount,
            recipient = %transfer.recipient,
            "Submitting transfer"
        );
        reporter.submitting(&transfer)?;

        let result = self.submitter.submit(&transfer).await.map_err(|e| {
            tracing::error!(stage = %Stage::Failed, error = %e, "Submission failed");
            e
        })?;

        tracing::info!(
            stage = %Stage::Reported,
            tx_hash = %result.transaction_hash,
            relayer_nonce = result.relayer_nonce,
            "Transfer submitted"
        );
        reporter.submitted(&result)?;

        Ok(TransferOutcome {
            quote,
            transfer: Some(transfer),
            result: Some(result),
        })
    }
}
