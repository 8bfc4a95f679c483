//! Batched storage query gateway.
//!
//! The read layer never talks to a node directly. All chain access goes
//! through [`BatchQueryGateway`], which takes a batch of storage queries and
//! returns decoded values. An implementation is expected to:
//!
//! - render account-id keys and values as SS58 strings,
//! - normalize all unsigned integers to `u128` primitives,
//! - decode storage values into [`scale_value::Value`] trees.
//!
//! Both batch operations accept an optional block hash; `None` means the
//! latest block. The hash is passed through to the node unchanged so that a
//! multi-batch read can be pinned to one consistent state.

use crate::errors::{ConsistencyFault, TorusResult};
use async_trait::async_trait;
use scale_value::Value;
use std::collections::HashMap;

/// Block hash used to pin queries to a specific block.
pub type BlockHash = sp_core::H256;

/// A single storage query: a pallet name and a storage item name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageQuery {
    /// Pallet (storage module) name, e.g. `Torus0`
    pub pallet: String,
    /// Storage item name, e.g. `Agents`
    pub item: String,
}

impl StorageQuery {
    pub fn new(pallet: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            pallet: pallet.into(),
            item: item.into(),
        }
    }
}

/// A batch of storage queries, grouped by pallet.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub queries: Vec<StorageQuery>,
}

impl BatchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a storage query to the batch.
    pub fn storage(mut self, pallet: impl Into<String>, item: impl Into<String>) -> Self {
        self.queries.push(StorageQuery::new(pallet, item));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Key of a storage map entry.
///
/// Torus storage maps are keyed either by numeric subnet id or by SS58
/// account address; the gateway reports which.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// Numeric key (netuid)
    Id(u16),
    /// SS58 account address
    Address(String),
}

impl MapKey {
    /// The numeric key, if this is one.
    pub fn as_id(&self) -> Option<u16> {
        match self {
            MapKey::Id(id) => Some(*id),
            MapKey::Address(_) => None,
        }
    }

    /// The account address, if this is one.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            MapKey::Id(_) => None,
            MapKey::Address(addr) => Some(addr),
        }
    }
}

impl std::fmt::Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapKey::Id(id) => write!(f, "{}", id),
            MapKey::Address(addr) => write!(f, "{}", addr),
        }
    }
}

/// Results of a scalar batch: one decoded value per storage item.
///
/// Items missing from the result mean the storage value is unset on chain.
#[derive(Debug, Clone, Default)]
pub struct ScalarBatch {
    values: HashMap<StorageQuery, Value>,
}

impl ScalarBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result for a storage item.
    pub fn insert(&mut self, pallet: impl Into<String>, item: impl Into<String>, value: Value) {
        self.values.insert(StorageQuery::new(pallet, item), value);
    }

    /// Look up a storage item's value, if present.
    pub fn get(&self, pallet: &str, item: &str) -> Option<&Value> {
        self.values.get(&StorageQuery::new(pallet, item))
    }

    /// Look up a storage item's value, failing with a consistency fault
    /// naming the item if it is absent.
    pub fn require(&self, pallet: &str, item: &str) -> TorusResult<&Value> {
        self.get(pallet, item).ok_or_else(|| {
            ConsistencyFault::with_storage(
                format!("mandatory storage value {}::{} is unset", pallet, item),
                format!("{}::{}", pallet, item),
            )
            .into()
        })
    }
}

/// Results of a map batch: all entries of each queried storage map.
///
/// A storage map absent from the result is indistinguishable from an empty
/// map; [`map_or_empty`](MapBatch::map_or_empty) treats both as no entries.
#[derive(Debug, Clone, Default)]
pub struct MapBatch {
    maps: HashMap<StorageQuery, Vec<(MapKey, Value)>>,
}

impl MapBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entries of a storage map.
    pub fn insert(
        &mut self,
        pallet: impl Into<String>,
        item: impl Into<String>,
        entries: Vec<(MapKey, Value)>,
    ) {
        self.maps.insert(StorageQuery::new(pallet, item), entries);
    }

    /// All entries of a storage map, if the map was returned.
    pub fn map(&self, pallet: &str, item: &str) -> Option<&[(MapKey, Value)]> {
        self.maps
            .get(&StorageQuery::new(pallet, item))
            .map(|v| v.as_slice())
    }

    /// All entries of a storage map, treating an absent map as empty.
    pub fn map_or_empty(&self, pallet: &str, item: &str) -> &[(MapKey, Value)] {
        self.map(pallet, item).unwrap_or(&[])
    }
}

/// Batched access to chain storage.
///
/// The read layer issues one batch per builder so that all storage reads of
/// a single logical view come from the same block.
#[async_trait]
pub trait BatchQueryGateway: Send + Sync {
    /// Query plain (non-map) storage values.
    async fn query_batch(
        &self,
        request: BatchRequest,
        at: Option<BlockHash>,
    ) -> TorusResult<ScalarBatch>;

    /// Query full storage maps, returning every entry of each map.
    async fn query_batch_map(
        &self,
        request: BatchRequest,
        at: Option<BlockHash>,
    ) -> TorusResult<MapBatch>;
}
