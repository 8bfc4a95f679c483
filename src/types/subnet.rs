//! Per-subnet parameter views.

use crate::types::Address;
use crate::utils::balance::Rems;
use serde::{Deserialize, Serialize};

/// How proposals on a subnet are decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteMode {
    Authority,
    Vote,
}

/// Per-subnet governance configuration
/// (`Governance::SubnetGovernanceConfig`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Cost of submitting a proposal, in rems
    pub proposal_cost: u128,
    /// Proposal lifetime in blocks
    pub proposal_expiration: u64,
    pub vote_mode: VoteMode,
    pub proposal_reward_treasury_allocation: u64,
    pub max_proposal_reward_treasury_allocation: u64,
    pub proposal_reward_interval: u64,
}

/// Registration burn configuration (`Torus0::ModuleBurnConfig`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnConfig {
    /// Minimum registration burn, in rems
    pub min_burn: u128,
    /// Maximum registration burn, in rems
    pub max_burn: u128,
    pub adjustment_alpha: u64,
    pub target_registrations_interval: u64,
    pub target_registrations_per_interval: u64,
    pub max_registrations_per_interval: u64,
}

/// Merged per-subnet view: every Torus0 subnet parameter joined with the
/// subnet's governance configuration and current emission.
///
/// `Torus0::SubnetNames` is the authoritative subnet index; a subnet appears
/// in the view exactly when it has a name. Fields typed `Option` are the
/// parameters that may be unset on chain; the rest are mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubnetView {
    pub name: String,
    /// Validated SS58 account address of the subnet founder
    pub founder: Address,
    /// Founder's share of emission, in percent
    pub founder_share: u16,
    /// Incentive/dividend split, in percent
    pub incentive_ratio: u16,
    pub max_allowed_uids: u64,
    pub max_allowed_weights: u64,
    pub min_allowed_weights: u64,
    /// Epoch length in blocks
    pub tempo: u64,
    /// Current per-epoch emission, in rems
    pub emission: u128,
    pub max_weight_age: u64,
    /// Blocks a new module is immune from deregistration
    pub immunity_period: u64,
    pub governance_config: GovernanceConfig,
    /// Unset on subnets that never enabled bonds smoothing
    pub bonds_ma: Option<u64>,
    pub maximum_set_weight_calls_per_epoch: u32,
    pub min_validator_stake: Rems,
    pub max_allowed_validators: u16,
    /// Unset on subnets using the global burn schedule
    pub module_burn_config: Option<BurnConfig>,
    pub subnet_metadata: Option<String>,
    pub max_encryption_period: u64,
    pub copier_margin: u64,
    pub use_weights_encryption: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governance_config_deserializes_from_storage_shape() {
        let json = serde_json::json!({
            "proposal_cost": 10_000_000_000_000_000_000u128,
            "proposal_expiration": 75_600,
            "vote_mode": "Vote",
            "proposal_reward_treasury_allocation": 2,
            "max_proposal_reward_treasury_allocation": 10_000,
            "proposal_reward_interval": 75_600
        });
        let config: GovernanceConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.vote_mode, VoteMode::Vote);
        assert_eq!(config.proposal_cost, 10u128 * 10u128.pow(18));
    }
}
