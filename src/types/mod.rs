//! Domain types for the Torus read layer.

pub mod agent;
pub mod global;
pub mod subnet;

pub use agent::{Agent, AgentRecord, StakeEdge};
pub use global::GlobalParams;
pub use subnet::{BurnConfig, GovernanceConfig, SubnetView, VoteMode};

use crate::errors::{InvalidAddress, TorusResult};
use crate::utils::ss58::is_valid_ss58_address;
use serde::{Deserialize, Serialize};

/// A validated SS58 account address.
///
/// Construction checks the SS58 checksum; an `Address` in hand is always a
/// well-formed account id. Invalid inputs are rejected, never coerced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Validate and wrap an SS58 address string.
    pub fn parse(address: impl Into<String>) -> TorusResult<Self> {
        let address = address.into();
        if is_valid_ss58_address(&address) {
            Ok(Self(address))
        } else {
            Err(InvalidAddress::new(address, "not a valid SS58 address").into())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Address {
    type Error = crate::errors::TorusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn test_address_parse_valid() {
        let addr = Address::parse(ALICE).unwrap();
        assert_eq!(addr.as_str(), ALICE);
        assert_eq!(addr.to_string(), ALICE);
    }

    #[test]
    fn test_address_parse_invalid() {
        let err = Address::parse("not-an-address").unwrap_err();
        assert!(err.is_invalid_address());
    }

    #[test]
    fn test_address_serde_rejects_invalid() {
        let ok: Result<Address, _> = serde_json::from_str(&format!("\"{}\"", ALICE));
        assert!(ok.is_ok());
        let bad: Result<Address, _> = serde_json::from_str("\"garbage\"");
        assert!(bad.is_err());
    }
}
