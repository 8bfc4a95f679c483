//! Network-wide parameter view.

use crate::types::subnet::GovernanceConfig;
use crate::types::Address;
use serde::{Deserialize, Serialize};

/// Merged view of the network-wide parameters: the Torus0 global scalars
/// joined with the global governance configuration and curator.
///
/// Every field is mandatory; a missing storage value aborts the build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalParams {
    pub max_name_length: u16,
    pub min_name_length: u16,
    pub max_allowed_subnets: u16,
    pub max_allowed_modules: u16,
    pub max_registrations_per_block: u16,
    pub max_allowed_weights: u16,
    /// Floor on per-module delegation fee, in percent
    pub floor_delegation_fee: u8,
    /// Floor on subnet founder share, in percent
    pub floor_founder_share: u8,
    /// Minimum stake required to set weights, in rems
    pub min_weight_stake: u128,
    pub curator: Address,
    pub governance_config: GovernanceConfig,
    pub kappa: u16,
    pub rho: u16,
    /// Blocks a new subnet is immune from deregistration
    pub subnet_immunity_period: u64,
    /// Current cost of registering a subnet, in rems
    pub subnet_registration_cost: u128,
    /// Cost of a whitelist application, in rems
    pub general_subnet_application_cost: u128,
}
