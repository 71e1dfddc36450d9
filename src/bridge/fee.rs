//! Fee quotes from the bridge relayer API.
//!
//! Endpoint:
//! - GET /api/v1/transfer-fee?sender=<omni>&recipient=<omni>&token=<omni>

use alloy::primitives::U256;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use std::time::Duration;
use thiserror::Error;

use crate::bridge::address::OmniAddress;
use crate::bridge::types::FeeQuote;

/// Errors from the fee-estimation service.
#[derive(Debug, Error)]
pub enum FeeError {
    /// Connection failure, timeout, or other transport problem.
    #[error("fee service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("fee service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a fee quote.
    #[error("failed to decode fee response: {0}")]
    Decode(String),
}

impl FeeError {
    /// Whether asking again could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeeError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            FeeError::Status { status, .. } => *status == 429 || *status >= 500,
            FeeError::Decode(_) => false,
        }
    }
}

/// Source of fee quotes.
#[async_trait]
pub trait FeeOracle: Send + Sync {
    /// Quote the fees for moving `token` from `sender` to `recipient`.
    async fn quote(
        &self,
        sender: &OmniAddress,
        recipient: &OmniAddress,
        token: &OmniAddress,
    ) -> Result<FeeQuote, FeeError>;
}

/// Wire format of the transfer-fee endpoint.
///
/// Fees arrive as decimal strings or JSON numbers depending on magnitude;
/// `null` means the fee is not charged. Numbers are read from their raw text
/// so values past `u64::MAX` keep every digit.
#[derive(Debug, Deserialize)]
struct TransferFeeResponse {
    #[serde(default, deserialize_with = "deserialize_amount")]
    transferred_token_fee: U256,
    #[serde(default, deserialize_with = "deserialize_amount")]
    native_token_fee: U256,
}

fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    use serde::de::Error;

    match Option::<Box<RawValue>>::deserialize(deserializer)? {
        None => Ok(U256::ZERO),
        Some(raw) => parse_amount(raw.get()).map_err(D::Error::custom),
    }
}

/// Parse a raw JSON amount: an unsigned integer literal, or a string holding
/// decimal digits or `0x`-prefixed hex.
fn parse_amount(raw: &str) -> Result<U256, String> {
    let raw = raw.trim();
    let (text, radix) = match raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(quoted) => match quoted.strip_prefix("0x") {
            Some(hex) => (hex, 16),
            None => (quoted, 10),
        },
        None => (raw, 10),
    };

    if text.is_empty() || !text.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("amount {} is not a non-negative integer", raw));
    }

    U256::from_str_radix(text, radix as u64).map_err(|e| format!("invalid amount {}: {}", raw, e))
}

/// HTTP client for the relayer's fee endpoint.
#[derive(Debug, Clone)]
pub struct OmniBridgeApi {
    base_url: String,
    client: reqwest::Client,
}

impl OmniBridgeApi {
    /// Create a client with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FeeOracle for OmniBridgeApi {
    async fn quote(
        &self,
        sender: &OmniAddress,
        recipient: &OmniAddress,
        token: &OmniAddress,
    ) -> Result<FeeQuote, FeeError> {
        let url = format!("{}/api/v1/transfer-fee", self.base_url);
        tracing::debug!(
            url = %url,
            sender = %sender,
            recipient = %recipient,
            token = %token,
            "Requesting fee quote"
        );

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("sender", sender.to_string()),
                ("recipient", recipient.to_string()),
                ("token", token.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(FeeError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: TransferFeeResponse = serde_json::from_str(&text)
            .map_err(|e| FeeError::Decode(format!("{} in body '{}'", e, text)))?;

        Ok(FeeQuote {
            token_fee: body.transferred_token_fee,
            native_fee: body.native_token_fee,
        })
    }
}
