//! Local-balance aggregators.
//!
//! These operations project chain-wide balance and stake maps onto a caller's
//! local key directory: an ordered list of `(alias, address)` pairs. Every
//! alias always appears in the output; an address absent from the chain map
//! contributes zero. Input order is preserved for equal amounts when the
//! results are sorted.

use crate::errors::TorusResult;
use crate::gateway::{BatchQueryGateway, BatchRequest, BlockHash};
use crate::queries::stake::{normalize_stake_edges, sum_edges};
use crate::types::Address;
use crate::utils::balance::Rems;
use crate::utils::decode::extract_free_balance;
use std::collections::HashMap;
use tracing::debug;

/// Project an address-keyed amount map onto aliases, absent addresses
/// contributing zero.
pub fn project_to_aliases(
    amounts: &HashMap<String, Rems>,
    aliases: &[(String, Address)],
) -> Vec<(String, Rems)> {
    aliases
        .iter()
        .map(|(alias, address)| {
            let amount = amounts.get(address.as_str()).copied().unwrap_or(Rems::ZERO);
            (alias.clone(), amount)
        })
        .collect()
}

/// Sort alias/amount pairs descending by amount. The sort is stable, so
/// equal amounts keep their input order.
fn sort_descending(mut amounts: Vec<(String, Rems)>) -> Vec<(String, Rems)> {
    amounts.sort_by(|a, b| b.1.cmp(&a.1));
    amounts
}

/// Free balances per address from raw `System::Account` entries.
///
/// Records without a readable `data.free` field are skipped, matching the
/// treatment of non-account system entries.
fn free_balances_by_address(
    entries: &[(crate::gateway::MapKey, scale_value::Value)],
) -> HashMap<String, Rems> {
    let mut balances = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        if let (Some(address), Some(free)) = (key.as_address(), extract_free_balance(value)) {
            balances.insert(address.to_string(), Rems::new(free));
        }
    }
    balances
}

/// Free balance per local alias; addresses without an account record get 0.
pub async fn aggregate_local_balances(
    gateway: &dyn BatchQueryGateway,
    at: Option<BlockHash>,
    aliases: &[(String, Address)],
) -> TorusResult<Vec<(String, Rems)>> {
    let request = BatchRequest::new().storage("System", "Account");
    let maps = gateway.query_batch_map(request, at).await?;
    let balances = free_balances_by_address(maps.map_or_empty("System", "Account"));
    Ok(project_to_aliases(&balances, aliases))
}

/// Total outgoing stake per local alias (`Torus0::StakingTo`).
pub async fn aggregate_local_stake_to(
    gateway: &dyn BatchQueryGateway,
    at: Option<BlockHash>,
    aliases: &[(String, Address)],
) -> TorusResult<Vec<(String, Rems)>> {
    let request = BatchRequest::new().storage("Torus0", "StakingTo");
    let maps = gateway.query_batch_map(request, at).await?;
    let edges = normalize_stake_edges(maps.map_or_empty("Torus0", "StakingTo"), "StakingTo")?;
    let totals = edges
        .into_iter()
        .map(|(address, edges)| (address, sum_edges(&edges)))
        .collect();
    Ok(project_to_aliases(&totals, aliases))
}

/// Total incoming stake per local alias (`Torus0::StakedBy`).
pub async fn aggregate_local_stake_from(
    gateway: &dyn BatchQueryGateway,
    at: Option<BlockHash>,
    aliases: &[(String, Address)],
) -> TorusResult<Vec<(String, Rems)>> {
    let request = BatchRequest::new().storage("Torus0", "StakedBy");
    let maps = gateway.query_batch_map(request, at).await?;
    let edges = normalize_stake_edges(maps.map_or_empty("Torus0", "StakedBy"), "StakedBy")?;
    let totals = edges
        .into_iter()
        .map(|(address, edges)| (address, sum_edges(&edges)))
        .collect();
    Ok(project_to_aliases(&totals, aliases))
}

/// Free balance and total outgoing stake per local alias, fetched in a
/// single batch so both views come from the same block.
///
/// Both result lists are sorted descending by amount.
pub async fn aggregate_local_balance_and_stake(
    gateway: &dyn BatchQueryGateway,
    at: Option<BlockHash>,
    aliases: &[(String, Address)],
) -> TorusResult<(Vec<(String, Rems)>, Vec<(String, Rems)>)> {
    let request = BatchRequest::new()
        .storage("System", "Account")
        .storage("Torus0", "StakingTo");
    let maps = gateway.query_batch_map(request, at).await?;

    let balances = free_balances_by_address(maps.map_or_empty("System", "Account"));
    let edges = normalize_stake_edges(maps.map_or_empty("Torus0", "StakingTo"), "StakingTo")?;
    let stakes: HashMap<String, Rems> = edges
        .into_iter()
        .map(|(address, edges)| (address, sum_edges(&edges)))
        .collect();

    let by_balance = sort_descending(project_to_aliases(&balances, aliases));
    let by_stake = sort_descending(project_to_aliases(&stakes, aliases));

    debug!(aliases = aliases.len(), "aggregated local balances and stake");
    Ok((by_balance, by_stake))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(name: &str, address: &Address) -> (String, Address) {
        (name.to_string(), address.clone())
    }

    fn test_address(seed: u8) -> Address {
        let encoded = crate::utils::ss58::ss58_encode(&[seed; 32]);
        Address::parse(encoded).unwrap()
    }

    #[test]
    fn test_absent_address_projects_to_zero() {
        let alice = test_address(1);
        let bob = test_address(2);
        let mut amounts = HashMap::new();
        amounts.insert(alice.as_str().to_string(), Rems::new(100));

        let aliases = vec![alias("alice", &alice), alias("bob", &bob)];
        let projected = project_to_aliases(&amounts, &aliases);
        assert_eq!(projected[0], ("alice".to_string(), Rems::new(100)));
        assert_eq!(projected[1], ("bob".to_string(), Rems::ZERO));
    }

    #[test]
    fn test_sort_descending_is_stable_for_ties() {
        let sorted = sort_descending(vec![
            ("first".to_string(), Rems::new(5)),
            ("second".to_string(), Rems::new(9)),
            ("third".to_string(), Rems::new(5)),
        ]);
        assert_eq!(sorted[0].0, "second");
        assert_eq!(sorted[1].0, "first");
        assert_eq!(sorted[2].0, "third");
    }

    #[test]
    fn test_malformed_account_records_are_skipped() {
        let good = test_address(3);
        let account = scale_value::Value::named_composite([(
            "data",
            scale_value::Value::named_composite([("free", scale_value::Value::u128(7))]),
        )]);
        let malformed = scale_value::Value::named_composite([(
            "consumers",
            scale_value::Value::u128(0),
        )]);
        let entries = vec![
            (
                crate::gateway::MapKey::Address(good.as_str().to_string()),
                account,
            ),
            (
                crate::gateway::MapKey::Address(test_address(4).as_str().to_string()),
                malformed,
            ),
        ];
        let balances = free_balances_by_address(&entries);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[good.as_str()], Rems::new(7));
    }
}
