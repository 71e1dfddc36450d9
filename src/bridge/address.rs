//! Canonical cross-chain addresses.
//!
//! The relayer identifies every account and token as `<chain>:<native>`, e.g.
//! `base:0x833589fC...` or `near:alice.near`. The native part is not checked
//! here; a malformed address is rejected by the relayer or by the chain.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Chains known to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    Eth,
    Near,
    Sol,
    Arb,
    Base,
}

impl ChainKind {
    /// Prefix used in canonical addresses.
    pub fn prefix(self) -> &'static str {
        match self {
            ChainKind::Eth => "eth",
            ChainKind::Near => "near",
            ChainKind::Sol => "sol",
            ChainKind::Arb => "arb",
            ChainKind::Base => "base",
        }
    }

    /// Whether addresses on this chain are 20-byte EVM addresses.
    pub fn is_evm(self) -> bool {
        match self {
            ChainKind::Eth | ChainKind::Arb | ChainKind::Base => true,
            ChainKind::Near | ChainKind::Sol => false,
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for ChainKind {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eth" => Ok(ChainKind::Eth),
            "near" => Ok(ChainKind::Near),
            "sol" => Ok(ChainKind::Sol),
            "arb" => Ok(ChainKind::Arb),
            "base" => Ok(ChainKind::Base),
            other => Err(AddressError::UnknownChain(other.to_string())),
        }
    }
}

/// Errors from parsing a canonical address string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("unknown chain prefix '{0}'")]
    UnknownChain(String),

    #[error("expected '<chain>:<address>', got '{0}'")]
    Malformed(String),
}

/// A chain-tagged native address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OmniAddress {
    chain: ChainKind,
    address: String,
}

impl OmniAddress {
    pub fn new(chain: ChainKind, address: impl Into<String>) -> Self {
        Self {
            chain,
            address: address.into(),
        }
    }

    pub fn chain(&self) -> ChainKind {
        self.chain
    }

    /// Native address without the chain prefix.
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Wrap a native address in its canonical cross-chain form.
pub fn omni_address(chain: ChainKind, address: &str) -> OmniAddress {
    OmniAddress::new(chain, address)
}

impl fmt::Display for OmniAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.address)
    }
}

impl FromStr for OmniAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, address) = s
            .split_once(':')
            .filter(|(_, address)| !address.is_empty())
            .ok_or_else(|| AddressError::Malformed(s.to_string()))?;
        Ok(Self::new(prefix.parse()?, address))
    }
}

impl Serialize for OmniAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OmniAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form() {
        let sender = omni_address(ChainKind::Base, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(
            sender.to_string(),
            "base:0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );

        let recipient = omni_address(ChainKind::Near, "alice.near");
        assert_eq!(recipient.to_string(), "near:alice.near");
        assert_eq!(recipient.chain(), ChainKind::Near);
        assert_eq!(recipient.address(), "alice.near");
    }

    #[test]
    fn test_native_address_not_validated() {
        let token = omni_address(ChainKind::Base, "0xTOKEN");
        assert_eq!(token.to_string(), "base:0xTOKEN");
    }

    #[test]
    fn test_parse() {
        let parsed: OmniAddress = "near:alice.near".parse().unwrap();
        assert_eq!(parsed, omni_address(ChainKind::Near, "alice.near"));

        // Only the first colon separates the prefix.
        let parsed: OmniAddress = "sol:a:b".parse().unwrap();
        assert_eq!(parsed.address(), "a:b");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "btc:bc1q".parse::<OmniAddress>().unwrap_err(),
            AddressError::UnknownChain("btc".to_string())
        );
        assert!(matches!(
            "alice.near".parse::<OmniAddress>(),
            Err(AddressError::Malformed(_))
        ));
        assert!(matches!(
            "near:".parse::<OmniAddress>(),
            Err(AddressError::Malformed(_))
        ));
    }

    #[test]
    fn test_serializes_as_string() {
        let addr = omni_address(ChainKind::Arb, "0x01");
        assert_eq!(serde_json::to_string(&addr).unwrap(), "\"arb:0x01\"");
    }

    #[test]
    fn test_evm_chains() {
        assert!(ChainKind::Base.is_evm());
        assert!(ChainKind::Eth.is_evm());
        assert!(!ChainKind::Near.is_evm());
        assert!(!ChainKind::Sol.is_evm());
    }
}
