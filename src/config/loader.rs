//! Configuration loading from the environment.

use alloy::primitives::U256;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::config::schema::{
    default_receipt_timeout_secs, default_rpc_timeout_secs, BridgeConfig, Network, RetryConfig,
    TransferConfig,
};
use crate::config::validation::{validate_config, ValidationError};

pub const RPC_URL_VAR: &str = "BASE_RPC_URL";
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";
pub const TOKEN_ADDRESS_VAR: &str = "TOKEN_ADDRESS";
pub const NEAR_ACCOUNT_VAR: &str = "NEAR_ACCOUNT_ID";
pub const AMOUNT_VAR: &str = "AMOUNT";

/// Variables that must be present and non-empty.
pub const REQUIRED_VARS: [&str; 5] = [
    RPC_URL_VAR,
    PRIVATE_KEY_VAR,
    TOKEN_ADDRESS_VAR,
    NEAR_ACCOUNT_VAR,
    AMOUNT_VAR,
];

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required variables are absent or empty.
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// Values are present but rejected.
    #[error("invalid configuration: {}", ValidationList(.0))]
    Invalid(Vec<ValidationError>),

    /// The signing key could not be turned into a signer.
    #[error("invalid PRIVATE_KEY: {0}")]
    InvalidKey(String),

    /// The `.env` file exists but could not be read.
    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

struct ValidationList<'a>(&'a [ValidationError]);

impl fmt::Display for ValidationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

/// Load configuration from the process environment.
///
/// `env_file` is read first when it exists; variables already set in the
/// environment take precedence over it.
pub fn load_from_env(env_file: &Path) -> Result<TransferConfig, ConfigError> {
    if env_file.exists() {
        dotenvy::from_path(env_file)?;
        tracing::debug!(path = %env_file.display(), "Loaded env file");
    }
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary key lookup.
///
/// Every missing required key is reported together; nothing is parsed until
/// all of them are present.
pub fn load_from_lookup<F>(lookup: F) -> Result<TransferConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let missing: Vec<&'static str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|key| value(*key).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::Missing(missing));
    }

    let mut errors = Vec::new();

    let amount_raw = value(AMOUNT_VAR).unwrap_or_default();
    let amount = parse_amount(&amount_raw).unwrap_or_else(|reason| {
        errors.push(ValidationError::new(
            AMOUNT_VAR,
            format!("'{}' is not a non-negative integer: {}", amount_raw, reason),
        ));
        U256::ZERO
    });

    let network = parse_or(value("BRIDGE_NETWORK"), "BRIDGE_NETWORK", Network::default(), &mut errors);

    let mut bridge = BridgeConfig::for_network(network);
    if let Some(api_url) = value("BRIDGE_API_URL") {
        bridge.api_url = api_url.trim_end_matches('/').to_string();
    }
    bridge.contract_address = parse_or(
        value("OMNI_BRIDGE_ADDRESS"),
        "OMNI_BRIDGE_ADDRESS",
        bridge.contract_address,
        &mut errors,
    );

    let defaults = RetryConfig::default();
    let retries = RetryConfig {
        max_retries: parse_or(value("FEE_QUOTE_RETRIES"), "FEE_QUOTE_RETRIES", defaults.max_retries, &mut errors),
        base_delay_ms: parse_or(value("RETRY_BASE_DELAY_MS"), "RETRY_BASE_DELAY_MS", defaults.base_delay_ms, &mut errors),
        max_delay_ms: parse_or(value("RETRY_MAX_DELAY_MS"), "RETRY_MAX_DELAY_MS", defaults.max_delay_ms, &mut errors),
    };

    let config = TransferConfig {
        rpc_url: value(RPC_URL_VAR).unwrap_or_default(),
        private_key: value(PRIVATE_KEY_VAR).unwrap_or_default(),
        token_address: value(TOKEN_ADDRESS_VAR).unwrap_or_default(),
        near_account_id: value(NEAR_ACCOUNT_VAR).unwrap_or_default(),
        amount,
        network,
        bridge,
        retries,
        rpc_timeout_secs: parse_or(value("RPC_TIMEOUT_SECS"), "RPC_TIMEOUT_SECS", default_rpc_timeout_secs(), &mut errors),
        receipt_timeout_secs: parse_or(
            value("RECEIPT_TIMEOUT_SECS"),
            "RECEIPT_TIMEOUT_SECS",
            default_receipt_timeout_secs(),
            &mut errors,
        ),
    };

    // Fields that already failed to parse are not reported twice.
    if let Err(semantic) = validate_config(&config) {
        for err in semantic {
            if !errors.iter().any(|e| e.field == err.field) {
                errors.push(err);
            }
        }
    }

    if !errors.is_empty() {
        return Err(ConfigError::Invalid(errors));
    }

    tracing::debug!(config = ?config, "Configuration loaded");
    Ok(config)
}

/// Plain base-10 digits only; no sign, separators, or radix prefix.
fn parse_amount(raw: &str) -> Result<U256, String> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err("only the digits 0-9 are allowed".to_string());
    }
    U256::from_str_radix(raw, 10).map_err(|e| e.to_string())
}

fn parse_or<T>(
    raw: Option<String>,
    field: &'static str,
    default: T,
    errors: &mut Vec<ValidationError>,
) -> T
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            errors.push(ValidationError::new(field, format!("'{}': {}", raw, e)));
            default
        }),
    }
}
