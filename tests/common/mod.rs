//! Shared test fixtures: an in-memory gateway and storage value builders.
#![allow(dead_code)]

use async_trait::async_trait;
use scale_value::{Composite, Value};
use std::sync::Mutex;
use torus_rs::{
    BatchQueryGateway, BatchRequest, BlockHash, MapBatch, MapKey, ScalarBatch, TorusResult,
};

/// Gateway backed by canned responses. Records the block hash of every
/// batch so tests can assert pinning behavior.
pub struct MockGateway {
    scalars: ScalarBatch,
    maps: MapBatch,
    pub seen_at: Mutex<Vec<Option<BlockHash>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            scalars: ScalarBatch::new(),
            maps: MapBatch::new(),
            seen_at: Mutex::new(Vec::new()),
        }
    }

    pub fn with_scalar(mut self, pallet: &str, item: &str, value: Value) -> Self {
        self.scalars.insert(pallet, item, value);
        self
    }

    pub fn with_map(mut self, pallet: &str, item: &str, entries: Vec<(MapKey, Value)>) -> Self {
        self.maps.insert(pallet, item, entries);
        self
    }

    pub fn batches_served(&self) -> usize {
        self.seen_at.lock().unwrap().len()
    }
}

#[async_trait]
impl BatchQueryGateway for MockGateway {
    async fn query_batch(
        &self,
        _request: BatchRequest,
        at: Option<BlockHash>,
    ) -> TorusResult<ScalarBatch> {
        self.seen_at.lock().unwrap().push(at);
        Ok(self.scalars.clone())
    }

    async fn query_batch_map(
        &self,
        _request: BatchRequest,
        at: Option<BlockHash>,
    ) -> TorusResult<MapBatch> {
        self.seen_at.lock().unwrap().push(at);
        Ok(self.maps.clone())
    }
}

/// Deterministic SS58 address from a seed byte.
pub fn test_address(seed: u8) -> String {
    torus_rs::utils::ss58::ss58_encode(&[seed; 32])
}

pub fn none_value() -> Value {
    Value::variant("None", Composite::Unnamed(vec![]))
}

/// A `Torus0::Agents` record as the gateway would decode it.
pub fn agent_value(key: &str, name: &str, registration_block: u64) -> Value {
    Value::named_composite([
        ("key", Value::string(key)),
        ("name", Value::string(name)),
        ("url", Value::string(format!("https://{}.example", name))),
        ("metadata", none_value()),
        ("weight_penalty_factor", Value::u128(0)),
        ("registration_block", Value::u128(registration_block.into())),
        (
            "fees",
            Value::named_composite([
                ("staking_fee", Value::u128(5)),
                ("weight_control_fee", Value::u128(5)),
            ]),
        ),
    ])
}

/// A `System::Account` record with the given free balance.
pub fn account_value(free: u128) -> Value {
    Value::named_composite([
        ("nonce", Value::u128(0)),
        (
            "data",
            Value::named_composite([
                ("free", Value::u128(free)),
                ("reserved", Value::u128(0)),
            ]),
        ),
    ])
}

/// A stake double-map grouping: a list of `(counterparty, amount)` pairs.
pub fn stake_edges_value(edges: &[(&str, u128)]) -> Value {
    Value::unnamed_composite(edges.iter().map(|(who, amount)| {
        Value::unnamed_composite([Value::string(*who), Value::u128(*amount)])
    }))
}

/// A `GovernanceModule::SubnetGovernanceConfig` record.
pub fn governance_value() -> Value {
    Value::named_composite([
        ("proposal_cost", Value::u128(10_000_000_000_000_000_000)),
        ("proposal_expiration", Value::u128(75_600)),
        ("vote_mode", Value::variant("Vote", Composite::Unnamed(vec![]))),
        ("proposal_reward_treasury_allocation", Value::u128(2)),
        ("max_proposal_reward_treasury_allocation", Value::u128(10_000)),
        ("proposal_reward_interval", Value::u128(75_600)),
    ])
}

pub fn id_entry(netuid: u16, value: Value) -> (MapKey, Value) {
    (MapKey::Id(netuid), value)
}

pub fn addr_entry(address: &str, value: Value) -> (MapKey, Value) {
    (MapKey::Address(address.to_string()), value)
}
