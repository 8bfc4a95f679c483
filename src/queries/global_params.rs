//! Network-wide parameter builder.

use crate::errors::TorusResult;
use crate::gateway::{BatchQueryGateway, BatchRequest, BlockHash};
use crate::types::{Address, GlobalParams, GovernanceConfig};
use crate::utils::decode::{decode_record, decode_string, decode_u128, decode_u16, decode_u64};
use tracing::debug;

/// Build the network-wide parameter view.
///
/// Every queried storage value is mandatory; an unset value is a consistency
/// fault naming the item, and no partial view is returned.
pub async fn build_global_params(
    gateway: &dyn BatchQueryGateway,
    at: Option<BlockHash>,
) -> TorusResult<GlobalParams> {
    let request = BatchRequest::new()
        .storage("Torus0", "MaxNameLength")
        .storage("Torus0", "MinNameLength")
        .storage("Torus0", "MaxAllowedSubnets")
        .storage("Torus0", "MaxAllowedModules")
        .storage("Torus0", "MaxRegistrationsPerBlock")
        .storage("Torus0", "MaxAllowedWeightsGlobal")
        .storage("Torus0", "FloorDelegationFee")
        .storage("Torus0", "FloorFounderShare")
        .storage("Torus0", "MinWeightStake")
        .storage("Torus0", "Kappa")
        .storage("Torus0", "Rho")
        .storage("Torus0", "SubnetImmunityPeriod")
        .storage("Torus0", "SubnetBurn")
        .storage("GovernanceModule", "GlobalGovernanceConfig")
        .storage("GovernanceModule", "GeneralSubnetApplicationCost")
        .storage("GovernanceModule", "Curator");
    let values = gateway.query_batch(request, at).await?;

    let scalar_u16 = |item: &str| -> TorusResult<u16> {
        decode_u16(values.require("Torus0", item)?, item)
    };
    let scalar_u8 = |item: &str| -> TorusResult<u8> {
        let n = decode_u128(values.require("Torus0", item)?, item)?;
        u8::try_from(n).map_err(|_| {
            crate::errors::TypeFault::new(item, "value does not fit into u8").into()
        })
    };

    let governance_config: GovernanceConfig = decode_record(
        values.require("GovernanceModule", "GlobalGovernanceConfig")?,
        "GlobalGovernanceConfig",
    )?;
    let curator = decode_string(values.require("GovernanceModule", "Curator")?, "Curator")?;

    let params = GlobalParams {
        max_name_length: scalar_u16("MaxNameLength")?,
        min_name_length: scalar_u16("MinNameLength")?,
        max_allowed_subnets: scalar_u16("MaxAllowedSubnets")?,
        max_allowed_modules: scalar_u16("MaxAllowedModules")?,
        max_registrations_per_block: scalar_u16("MaxRegistrationsPerBlock")?,
        max_allowed_weights: scalar_u16("MaxAllowedWeightsGlobal")?,
        floor_delegation_fee: scalar_u8("FloorDelegationFee")?,
        floor_founder_share: scalar_u8("FloorFounderShare")?,
        min_weight_stake: decode_u128(
            values.require("Torus0", "MinWeightStake")?,
            "MinWeightStake",
        )?,
        curator: Address::parse(curator)?,
        governance_config,
        kappa: scalar_u16("Kappa")?,
        rho: scalar_u16("Rho")?,
        subnet_immunity_period: decode_u64(
            values.require("Torus0", "SubnetImmunityPeriod")?,
            "SubnetImmunityPeriod",
        )?,
        subnet_registration_cost: decode_u128(
            values.require("Torus0", "SubnetBurn")?,
            "SubnetBurn",
        )?,
        general_subnet_application_cost: decode_u128(
            values.require("GovernanceModule", "GeneralSubnetApplicationCost")?,
            "GeneralSubnetApplicationCost",
        )?,
    };

    debug!("built global params");
    Ok(params)
}
