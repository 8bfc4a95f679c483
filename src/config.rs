//! Configuration and network settings for Torus.
//!
//! Network endpoints, address format, unit constants, and the default table
//! for optional per-subnet parameters.

use crate::utils::balance::torus_to_rems;
use std::collections::HashMap;
use std::env;

/// Torus network names
pub const NETWORKS: &[&str] = &["mainnet", "testnet", "local"];

/// Network endpoints (WebSocket URLs)
pub const MAINNET_ENTRYPOINT: &str = "wss://api.torus.network";
pub const TESTNET_ENTRYPOINT: &str = "wss://api.testnet.torus.network";

/// Default local endpoint (can be overridden by TORUS_CHAIN_ENDPOINT)
pub fn local_entrypoint() -> String {
    env::var("TORUS_CHAIN_ENDPOINT").unwrap_or_else(|_| "ws://127.0.0.1:9944".to_string())
}

/// Default network
pub const DEFAULT_NETWORK: &str = "mainnet";

/// Block time in seconds
pub const BLOCKTIME: u64 = 8;

/// SS58 format for Torus (generic Substrate)
pub const SS58_FORMAT: u16 = 42;

/// Decimal precision of the base unit (1 TORUS = 10^18 rems)
pub const DECIMALS: u32 = 18;

/// Display unit name
pub const UNIT_NAME: &str = "TORUS";

/// Get network map (name -> endpoint)
pub fn network_map() -> HashMap<&'static str, String> {
    let mut map = HashMap::new();
    map.insert("mainnet", MAINNET_ENTRYPOINT.to_string());
    map.insert("testnet", TESTNET_ENTRYPOINT.to_string());
    map.insert("local", local_entrypoint());
    map
}

/// Determine chain endpoint and network name from a network string or URL.
///
/// If the input looks like a URL (starts with ws:// or wss://), it is used
/// directly. Otherwise it is treated as a network name and looked up in the
/// network map, falling back to mainnet.
pub fn determine_chain_endpoint_and_network(network: &str) -> (String, String) {
    if network.starts_with("ws://") || network.starts_with("wss://") {
        let network_name = network_map()
            .iter()
            .find(|(_, v)| v == &network)
            .map(|(k, _)| k.to_string())
            .unwrap_or_else(|| "custom".to_string());
        (network.to_string(), network_name)
    } else {
        let endpoint = network_map()
            .get(network)
            .cloned()
            .unwrap_or_else(|| MAINNET_ENTRYPOINT.to_string());
        (endpoint, network.to_string())
    }
}

/// Defaults applied to optional per-subnet storage items.
///
/// These storage items were introduced later than the rest of the subnet
/// parameter set and may be unset on older subnets. The values here encode
/// current network policy and may change over time, which is why they are a
/// configuration value rather than constants baked into the subnet builder:
/// callers can confirm them against live network parameters and override via
/// [`build_subnet_views_with_defaults`](crate::queries::subnets::build_subnet_views_with_defaults).
#[derive(Debug, Clone)]
pub struct SubnetDefaults {
    /// Torus0::MaximumSetWeightCallsPerEpoch
    pub max_set_weight_calls_per_epoch: u32,
    /// Torus0::MinValidatorStake, in rems
    pub min_validator_stake: u128,
    /// Torus0::MaxAllowedValidators
    pub max_allowed_validators: u16,
    /// Torus0::MaxEncryptionPeriod
    pub max_encryption_period: u64,
    /// Torus0::CopierMargin
    pub copier_margin: u64,
    /// Torus0::UseWeightsEncryption
    pub use_weights_encryption: u64,
}

impl Default for SubnetDefaults {
    fn default() -> Self {
        Self {
            max_set_weight_calls_per_epoch: 30,
            min_validator_stake: torus_to_rems(50_000.0),
            max_allowed_validators: 50,
            max_encryption_period: 0,
            copier_margin: 0,
            use_weights_encryption: 0,
        }
    }
}
