//! Agent records and the merged per-agent view.

use crate::utils::balance::Rems;
use serde::{Deserialize, Serialize};

/// Fee schedule stored inside an agent's registration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFees {
    /// Fee taken on stake delegated to this agent, in percent
    pub staking_fee: u8,
    /// Fee taken for weight-setting delegation, in percent
    pub weight_control_fee: u8,
}

/// Raw agent registration record as stored in `Torus0::Agents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// SS58 account address of the agent
    pub key: String,
    pub name: String,
    pub url: String,
    /// Optional off-chain metadata pointer (IPFS CID or URL)
    pub metadata: Option<String>,
    /// Penalty applied to the agent's weights, in percent
    pub weight_penalty_factor: u16,
    /// Block at which the agent registered
    pub registration_block: u64,
    pub fees: AgentFees,
}

/// One edge of the stake graph: who staked on (or received stake from)
/// an agent, and how much.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeEdge {
    /// SS58 account address of the other end of the edge
    pub counterparty: String,
    pub amount: Rems,
}

/// Merged per-agent view: registration record joined with its registration
/// block, incoming stake edges, and (optionally) its free balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// SS58 account address of the agent
    pub key: String,
    pub name: String,
    pub url: String,
    pub metadata: Option<String>,
    pub weight_penalty_factor: u16,
    /// Fee taken on stake delegated to this agent, in percent
    pub staking_fee: u8,
    /// Fee taken for weight-setting delegation, in percent
    pub weight_control_fee: u8,
    /// Block at which the agent registered
    pub registration_block: u64,
    /// Incoming stake edges (who staked on this agent)
    pub stake_from: Vec<StakeEdge>,
    /// Total incoming stake, the sum over `stake_from`
    pub stake: Rems,
    /// Free balance of the agent's account.
    ///
    /// `None` when balances were not requested; `Some(Rems::ZERO)` when they
    /// were requested and the account has no record.
    pub balance: Option<Rems>,
}
