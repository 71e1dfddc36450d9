//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation once values are parsed
//! - Check value ranges (amount > 0, timeouts > 0)
//! - Check endpoint URLs are usable http(s) URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TransferConfig → Result<(), Vec<ValidationError>>
//! - Runs before any network call is made

use std::fmt;

use crate::config::schema::TransferConfig;

/// A single rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Environment variable the value came from.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &TransferConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.amount.is_zero() {
        errors.push(ValidationError::new("AMOUNT", "must be greater than zero"));
    }

    if let Err(message) = check_http_url(&config.rpc_url) {
        errors.push(ValidationError::new("BASE_RPC_URL", message));
    }

    if let Err(message) = check_http_url(&config.bridge.api_url) {
        errors.push(ValidationError::new("BRIDGE_API_URL", message));
    }

    if config.token_address.trim().is_empty() {
        errors.push(ValidationError::new("TOKEN_ADDRESS", "cannot be empty"));
    }

    if config.near_account_id.trim().is_empty() {
        errors.push(ValidationError::new("NEAR_ACCOUNT_ID", "cannot be empty"));
    }

    if config.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("RPC_TIMEOUT_SECS", "must be greater than zero"));
    }

    if config.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "RECEIPT_TIMEOUT_SECS",
            "must be greater than zero",
        ));
    }

    if config.retries.base_delay_ms > config.retries.max_delay_ms {
        errors.push(ValidationError::new(
            "RETRY_BASE_DELAY_MS",
            format!(
                "{} exceeds RETRY_MAX_DELAY_MS ({})",
                config.retries.base_delay_ms, config.retries.max_delay_ms
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    let url = url::Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("unsupported scheme '{}' (expected http or https)", scheme)),
    }
}
