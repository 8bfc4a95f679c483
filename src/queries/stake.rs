//! Stake graph normalization.
//!
//! `Torus0::StakingTo` and `Torus0::StakedBy` are double maps keyed by
//! (account, counterparty). The gateway returns them grouped by outer
//! account, each value a list of `(counterparty, amount)` pairs; the same
//! outer account may appear in more than one grouping, so normalization
//! merges groupings per account.

use crate::errors::{TorusResult, TypeFault};
use crate::gateway::MapKey;
use crate::types::StakeEdge;
use crate::utils::balance::Rems;
use crate::utils::decode::extract_u128;
use scale_value::{Composite, Primitive, Value, ValueDef};
use std::collections::HashMap;

/// Decode one stake grouping: a list of `(counterparty, amount)` pairs.
fn decode_edges(value: &Value, item: &str) -> TorusResult<Vec<StakeEdge>> {
    let entries = match &value.value {
        ValueDef::Composite(composite) => composite.values().collect::<Vec<_>>(),
        _ => {
            return Err(TypeFault::new(item, "expected a list of stake edges").into());
        }
    };

    let mut edges = Vec::with_capacity(entries.len());
    for entry in entries {
        let pair = match &entry.value {
            ValueDef::Composite(Composite::Unnamed(pair)) if pair.len() == 2 => pair,
            _ => {
                return Err(
                    TypeFault::new(item, "expected a (counterparty, amount) pair").into(),
                );
            }
        };
        let counterparty = match &pair[0].value {
            ValueDef::Primitive(Primitive::String(s)) => s.clone(),
            _ => {
                return Err(TypeFault::new(item, "stake edge counterparty is not an address").into())
            }
        };
        let amount = extract_u128(&pair[1])
            .ok_or_else(|| TypeFault::new(item, "stake edge amount is not an unsigned integer"))?;
        edges.push(StakeEdge {
            counterparty,
            amount: Rems::new(amount),
        });
    }
    Ok(edges)
}

/// Normalize the raw entries of a stake double map into per-account edge
/// lists, merging repeated outer accounts.
pub fn normalize_stake_edges(
    entries: &[(MapKey, Value)],
    item: &str,
) -> TorusResult<HashMap<String, Vec<StakeEdge>>> {
    let mut normalized: HashMap<String, Vec<StakeEdge>> = HashMap::new();
    for (key, value) in entries {
        let account = key
            .as_address()
            .ok_or_else(|| TypeFault::new(item, "expected an account address map key"))?;
        let edges = decode_edges(value, item)?;
        normalized
            .entry(account.to_string())
            .or_default()
            .extend(edges);
    }
    Ok(normalized)
}

/// Sum the amounts across a list of stake edges.
pub fn sum_edges(edges: &[StakeEdge]) -> Rems {
    edges
        .iter()
        .fold(Rems::ZERO, |total, edge| total.saturating_add(edge.amount))
}
