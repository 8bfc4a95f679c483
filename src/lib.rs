//! # torus-rs
//!
//! A Rust client library for reading and aggregating Torus network chain
//! state. Chain access goes through a [`BatchQueryGateway`]: each view
//! builder issues one batch of storage queries and merges the decoded
//! results into domain records.
//!
//! ## Example
//!
//! ```no_run
//! use torus_rs::{build_agent_views, BatchQueryGateway, TorusResult};
//!
//! async fn print_agents(gateway: &dyn BatchQueryGateway) -> TorusResult<()> {
//!     let agents = build_agent_views(gateway, None, true).await?;
//!     for (address, agent) in &agents {
//!         println!("{}: {} staked", address, agent.stake);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod gateway;
pub mod logging;
pub mod queries;
pub mod types;
pub mod utils;

pub use config::SubnetDefaults;
pub use errors::{
    ConsistencyFault, GatewayError, InvalidAddress, TorusError, TorusResult, TypeFault,
};
pub use gateway::{BatchQueryGateway, BatchRequest, BlockHash, MapBatch, MapKey, ScalarBatch};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use queries::{
    aggregate_local_balance_and_stake, aggregate_local_balances, aggregate_local_stake_from,
    aggregate_local_stake_to, build_agent_views, build_global_params, build_subnet_views,
    build_subnet_views_with_defaults,
};
pub use types::{
    Address, Agent, AgentRecord, BurnConfig, GlobalParams, GovernanceConfig, StakeEdge,
    SubnetView, VoteMode,
};
pub use utils::balance::{
    format_rems, is_lossless_conversion, rems_to_torus, rems_to_torus_per_tempo,
    rewrite_amount_fields, torus_to_rems, Rems, Torus,
};
