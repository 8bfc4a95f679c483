//! Subnet view builder.
//!
//! Joins every per-subnet storage map into one `SubnetView` per subnet.
//! `Torus0::SubnetNames` is the authoritative index: a subnet exists exactly
//! when it has a name. A named subnet missing from a mandatory map is a
//! consistency fault naming the map and the netuid; the optional maps fall
//! back to [`SubnetDefaults`].

use crate::config::SubnetDefaults;
use crate::errors::{ConsistencyFault, TorusResult, TypeFault};
use crate::gateway::{BatchQueryGateway, BatchRequest, BlockHash, MapKey};
use crate::types::{Address, BurnConfig, GovernanceConfig, SubnetView};
use crate::utils::balance::Rems;
use crate::utils::decode::{decode_record, decode_string, decode_u128, decode_u16, decode_u32, decode_u64};
use scale_value::Value;
use std::collections::HashMap;
use tracing::debug;

/// Index a netuid-keyed storage map's entries by id.
fn index_by_netuid<'a>(
    entries: &'a [(MapKey, Value)],
    item: &str,
) -> TorusResult<HashMap<u16, &'a Value>> {
    let mut indexed = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        let netuid = key
            .as_id()
            .ok_or_else(|| TypeFault::new(item, "expected a numeric netuid map key"))?;
        indexed.insert(netuid, value);
    }
    Ok(indexed)
}

/// Look up a netuid in a mandatory map, failing with a consistency fault
/// naming the map and the id when absent.
fn require<'a>(
    map: &HashMap<u16, &'a Value>,
    netuid: u16,
    item: &str,
) -> TorusResult<&'a Value> {
    map.get(&netuid).copied().ok_or_else(|| {
        ConsistencyFault::with_key(
            format!("named subnet {} is missing from {}", netuid, item),
            item,
            netuid.to_string(),
        )
        .into()
    })
}

/// Build the merged per-subnet view using the standard defaults for
/// optional parameters.
pub async fn build_subnet_views(
    gateway: &dyn BatchQueryGateway,
    at: Option<BlockHash>,
) -> TorusResult<HashMap<u16, SubnetView>> {
    build_subnet_views_with_defaults(gateway, at, &SubnetDefaults::default()).await
}

/// Build the merged per-subnet view with caller-supplied defaults for the
/// optional parameters.
pub async fn build_subnet_views_with_defaults(
    gateway: &dyn BatchQueryGateway,
    at: Option<BlockHash>,
    defaults: &SubnetDefaults,
) -> TorusResult<HashMap<u16, SubnetView>> {
    let request = BatchRequest::new()
        .storage("Torus0", "ImmunityPeriod")
        .storage("Torus0", "MinAllowedWeights")
        .storage("Torus0", "MaxAllowedWeights")
        .storage("Torus0", "Tempo")
        .storage("Torus0", "MaxAllowedUids")
        .storage("Torus0", "Founder")
        .storage("Torus0", "FounderShare")
        .storage("Torus0", "IncentiveRatio")
        .storage("Torus0", "SubnetNames")
        .storage("Torus0", "MaxWeightAge")
        .storage("Torus0", "BondsMovingAverage")
        .storage("Torus0", "MaximumSetWeightCallsPerEpoch")
        .storage("Torus0", "MinValidatorStake")
        .storage("Torus0", "MaxAllowedValidators")
        .storage("Torus0", "ModuleBurnConfig")
        .storage("Torus0", "SubnetMetadata")
        .storage("Torus0", "MaxEncryptionPeriod")
        .storage("Torus0", "CopierMargin")
        .storage("Torus0", "UseWeightsEncryption")
        .storage("GovernanceModule", "SubnetGovernanceConfig")
        .storage("SubnetEmissionModule", "SubnetEmission");
    let maps = gateway.query_batch_map(request, at).await?;

    let names = index_by_netuid(maps.map_or_empty("Torus0", "SubnetNames"), "SubnetNames")?;
    let emission = index_by_netuid(
        maps.map_or_empty("SubnetEmissionModule", "SubnetEmission"),
        "SubnetEmission",
    )?;
    let tempo = index_by_netuid(maps.map_or_empty("Torus0", "Tempo"), "Tempo")?;
    let min_weights = index_by_netuid(
        maps.map_or_empty("Torus0", "MinAllowedWeights"),
        "MinAllowedWeights",
    )?;
    let max_weights = index_by_netuid(
        maps.map_or_empty("Torus0", "MaxAllowedWeights"),
        "MaxAllowedWeights",
    )?;
    let max_uids = index_by_netuid(maps.map_or_empty("Torus0", "MaxAllowedUids"), "MaxAllowedUids")?;
    let founder = index_by_netuid(maps.map_or_empty("Torus0", "Founder"), "Founder")?;
    let founder_share =
        index_by_netuid(maps.map_or_empty("Torus0", "FounderShare"), "FounderShare")?;
    let incentive_ratio =
        index_by_netuid(maps.map_or_empty("Torus0", "IncentiveRatio"), "IncentiveRatio")?;
    let max_weight_age =
        index_by_netuid(maps.map_or_empty("Torus0", "MaxWeightAge"), "MaxWeightAge")?;
    let immunity = index_by_netuid(maps.map_or_empty("Torus0", "ImmunityPeriod"), "ImmunityPeriod")?;
    let governance = index_by_netuid(
        maps.map_or_empty("GovernanceModule", "SubnetGovernanceConfig"),
        "SubnetGovernanceConfig",
    )?;

    let bonds_ma = index_by_netuid(
        maps.map_or_empty("Torus0", "BondsMovingAverage"),
        "BondsMovingAverage",
    )?;
    let set_weight_calls = index_by_netuid(
        maps.map_or_empty("Torus0", "MaximumSetWeightCallsPerEpoch"),
        "MaximumSetWeightCallsPerEpoch",
    )?;
    let min_validator_stake = index_by_netuid(
        maps.map_or_empty("Torus0", "MinValidatorStake"),
        "MinValidatorStake",
    )?;
    let max_validators = index_by_netuid(
        maps.map_or_empty("Torus0", "MaxAllowedValidators"),
        "MaxAllowedValidators",
    )?;
    let burn_config = index_by_netuid(
        maps.map_or_empty("Torus0", "ModuleBurnConfig"),
        "ModuleBurnConfig",
    )?;
    let metadata = index_by_netuid(maps.map_or_empty("Torus0", "SubnetMetadata"), "SubnetMetadata")?;
    let max_encryption = index_by_netuid(
        maps.map_or_empty("Torus0", "MaxEncryptionPeriod"),
        "MaxEncryptionPeriod",
    )?;
    let copier_margin = index_by_netuid(maps.map_or_empty("Torus0", "CopierMargin"), "CopierMargin")?;
    let weights_encryption = index_by_netuid(
        maps.map_or_empty("Torus0", "UseWeightsEncryption"),
        "UseWeightsEncryption",
    )?;

    let mut views = HashMap::with_capacity(names.len());
    for (&netuid, name) in &names {
        let name = decode_string(name, "SubnetNames")?;
        let founder_addr =
            decode_string(require(&founder, netuid, "Founder")?, "Founder")?;
        let governance_config: GovernanceConfig = decode_record(
            require(&governance, netuid, "SubnetGovernanceConfig")?,
            "SubnetGovernanceConfig",
        )?;

        let view = SubnetView {
            name,
            founder: Address::parse(founder_addr)?,
            founder_share: decode_u16(require(&founder_share, netuid, "FounderShare")?, "FounderShare")?,
            incentive_ratio: decode_u16(
                require(&incentive_ratio, netuid, "IncentiveRatio")?,
                "IncentiveRatio",
            )?,
            max_allowed_uids: decode_u64(
                require(&max_uids, netuid, "MaxAllowedUids")?,
                "MaxAllowedUids",
            )?,
            max_allowed_weights: decode_u64(
                require(&max_weights, netuid, "MaxAllowedWeights")?,
                "MaxAllowedWeights",
            )?,
            min_allowed_weights: decode_u64(
                require(&min_weights, netuid, "MinAllowedWeights")?,
                "MinAllowedWeights",
            )?,
            tempo: decode_u64(require(&tempo, netuid, "Tempo")?, "Tempo")?,
            emission: decode_u128(require(&emission, netuid, "SubnetEmission")?, "SubnetEmission")?,
            max_weight_age: decode_u64(
                require(&max_weight_age, netuid, "MaxWeightAge")?,
                "MaxWeightAge",
            )?,
            immunity_period: decode_u64(
                require(&immunity, netuid, "ImmunityPeriod")?,
                "ImmunityPeriod",
            )?,
            governance_config,
            bonds_ma: match bonds_ma.get(&netuid) {
                Some(value) => Some(decode_u64(value, "BondsMovingAverage")?),
                None => None,
            },
            maximum_set_weight_calls_per_epoch: match set_weight_calls.get(&netuid) {
                Some(value) => decode_u32(value, "MaximumSetWeightCallsPerEpoch")?,
                None => defaults.max_set_weight_calls_per_epoch,
            },
            min_validator_stake: match min_validator_stake.get(&netuid) {
                Some(value) => Rems::new(decode_u128(value, "MinValidatorStake")?),
                None => Rems::new(defaults.min_validator_stake),
            },
            max_allowed_validators: match max_validators.get(&netuid) {
                Some(value) => decode_u16(value, "MaxAllowedValidators")?,
                None => defaults.max_allowed_validators,
            },
            module_burn_config: match burn_config.get(&netuid) {
                Some(value) => Some(decode_record::<BurnConfig>(value, "ModuleBurnConfig")?),
                None => None,
            },
            subnet_metadata: match metadata.get(&netuid) {
                Some(value) => Some(decode_string(value, "SubnetMetadata")?),
                None => None,
            },
            max_encryption_period: match max_encryption.get(&netuid) {
                Some(value) => decode_u64(value, "MaxEncryptionPeriod")?,
                None => defaults.max_encryption_period,
            },
            copier_margin: match copier_margin.get(&netuid) {
                Some(value) => decode_u64(value, "CopierMargin")?,
                None => defaults.copier_margin,
            },
            use_weights_encryption: match weights_encryption.get(&netuid) {
                Some(value) => decode_u64(value, "UseWeightsEncryption")?,
                None => defaults.use_weights_encryption,
            },
        };

        views.insert(netuid, view);
    }

    debug!(subnets = views.len(), "built subnet views");
    Ok(views)
}
