//! View builders over batched storage queries.
//!
//! Each builder issues one batch through the gateway and merges the results
//! into domain records. Builders are all-or-nothing: any consistency, type,
//! or address fault aborts the build with no partial result.

pub mod agents;
pub mod balances;
pub mod global_params;
pub mod stake;
pub mod subnets;

pub use agents::build_agent_views;
pub use balances::{
    aggregate_local_balance_and_stake, aggregate_local_balances, aggregate_local_stake_from,
    aggregate_local_stake_to, project_to_aliases,
};
pub use global_params::build_global_params;
pub use stake::{normalize_stake_edges, sum_edges};
pub use subnets::{build_subnet_views, build_subnet_views_with_defaults};
