//! Agent view builder.
//!
//! Joins the agent registry with the incoming stake graph and, on request,
//! account balances. All storage reads go out as one batch so the whole view
//! reflects a single block.

use crate::errors::{TorusResult, TypeFault};
use crate::gateway::{BatchQueryGateway, BatchRequest, BlockHash};
use crate::queries::stake::{normalize_stake_edges, sum_edges};
use crate::types::{Address, Agent, AgentRecord};
use crate::utils::balance::Rems;
use crate::utils::decode::{decode_record, extract_free_balance};
use scale_value::Value;
use std::collections::HashMap;
use tracing::debug;

/// Build the merged per-agent view for every registered agent.
///
/// When `include_balances` is false each agent's `balance` is `None`; when
/// true it is the account's free balance, with accounts missing from
/// `System::Account` reported as zero.
///
/// An agent key that fails SS58 validation aborts the whole build; no
/// partial map is returned.
pub async fn build_agent_views(
    gateway: &dyn BatchQueryGateway,
    at: Option<BlockHash>,
    include_balances: bool,
) -> TorusResult<HashMap<Address, Agent>> {
    let mut request = BatchRequest::new()
        .storage("Torus0", "Agents")
        .storage("Torus0", "RegistrationBlock")
        .storage("Torus0", "StakingTo")
        .storage("Torus0", "StakedBy");
    if include_balances {
        request = request.storage("System", "Account");
    }
    let maps = gateway.query_batch_map(request, at).await?;

    let agents = maps.map_or_empty("Torus0", "Agents");
    let staked_by = normalize_stake_edges(maps.map_or_empty("Torus0", "StakedBy"), "StakedBy")?;

    let mut accounts: HashMap<&str, &Value> = HashMap::new();
    if include_balances {
        for (key, value) in maps.map_or_empty("System", "Account") {
            if let Some(address) = key.as_address() {
                accounts.insert(address, value);
            }
        }
    }

    let mut views = HashMap::with_capacity(agents.len());
    for (key, value) in agents {
        let address = key
            .as_address()
            .ok_or_else(|| TypeFault::new("Agents", "expected an account address map key"))?;
        let address = Address::parse(address)?;
        let record: AgentRecord = decode_record(value, "Agents")?;

        let stake_from = staked_by
            .get(address.as_str())
            .cloned()
            .unwrap_or_default();
        let stake = sum_edges(&stake_from);

        let balance = if include_balances {
            match accounts.get(address.as_str()) {
                Some(account) => {
                    let free = extract_free_balance(account).ok_or_else(|| {
                        TypeFault::new("Account", "account record has no data.free")
                    })?;
                    Some(Rems::new(free))
                }
                None => Some(Rems::ZERO),
            }
        } else {
            None
        };

        views.insert(
            address.clone(),
            Agent {
                key: record.key,
                name: record.name,
                url: record.url,
                metadata: record.metadata,
                weight_penalty_factor: record.weight_penalty_factor,
                staking_fee: record.fees.staking_fee,
                weight_control_fee: record.fees.weight_control_fee,
                // comes from the agent record, not the RegistrationBlock map
                registration_block: record.registration_block,
                stake_from,
                stake,
                balance,
            },
        );
    }

    debug!(agents = views.len(), include_balances, "built agent views");
    Ok(views)
}
