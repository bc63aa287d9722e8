use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};

use vault_core::deployment::{
    error::DeployError,
    params::{
        PlatformAddresses, RewardRegistration, RouteSet, StrategyParams, StrategyVariant,
        VaultParams,
    },
};
use vault_core::routes::route::SwapRoute;

use crate::contracts::{
    BalancerChefStrategy, BatchSwapStep, CommonAddresses, ComposableChefStrategy, IStrategyRewards,
    SolidlyGaugeStrategy, StakedGaugeStrategy, SwapHop, Vault,
};

/// Calldata for the vault's one-time initializer.
pub fn vault_initialize(strategy: Address, params: &VaultParams) -> Bytes {
    Vault::initializeCall {
        strategy,
        name: params.name.clone(),
        symbol: params.symbol.clone(),
        approvalDelay: U256::from(params.approval_delay),
    }
    .abi_encode()
    .into()
}

/// Calldata handing the vault to its long-term owner.
pub fn transfer_ownership(new_owner: Address) -> Bytes {
    Vault::transferOwnershipCall {
        newOwner: new_owner,
    }
    .abi_encode()
    .into()
}

/// Calldata for the strategy initializer, shaped by the configured variant.
pub fn strategy_initialize(
    vault: Address,
    platform: &PlatformAddresses,
    strategy: &StrategyParams,
) -> Result<Bytes, DeployError> {
    let common = common_addresses(vault, platform);
    let variant = strategy.variant;
    let routes = &strategy.routes;

    match variant {
        StrategyVariant::Plain => {
            let call = SolidlyGaugeStrategy::initializeCall {
                want: strategy.want,
                gauge: required(variant, strategy.gauge, "gauge")?,
                commonAddresses: common,
                outputToNativeRoute: solidly_hops(variant, &routes.output_to_native, "output_to_native")?,
                outputToLp0Route: solidly_hops(variant, &routes.output_to_lp0, "output_to_lp0")?,
                outputToLp1Route: solidly_hops(variant, &routes.output_to_lp1, "output_to_lp1")?,
            };
            Ok(call.abi_encode().into())
        }
        StrategyVariant::Staker => {
            let call = StakedGaugeStrategy::initializeCall {
                want: strategy.want,
                gauge: required(variant, strategy.gauge, "gauge")?,
                gaugeStaker: required(variant, strategy.staker, "staker")?,
                commonAddresses: common,
                outputToNativeRoute: solidly_hops(variant, &routes.output_to_native, "output_to_native")?,
                outputToLp0Route: solidly_hops(variant, &routes.output_to_lp0, "output_to_lp0")?,
                outputToLp1Route: solidly_hops(variant, &routes.output_to_lp1, "output_to_lp1")?,
            };
            Ok(call.abi_encode().into())
        }
        StrategyVariant::Balancer => {
            let (native_to_input, output_to_native, assets) = balancer_routes(variant, routes)?;
            let call = BalancerChefStrategy::initializeCall {
                want: strategy.want,
                flags: [false, false],
                nativeToInputRoute: native_to_input,
                outputToNativeRoute: output_to_native,
                assets,
                chef: required(variant, strategy.chef, "chef")?,
                poolId: U256::from(required(variant, strategy.pool_id, "pool_id")?),
                commonAddresses: common,
            };
            Ok(call.abi_encode().into())
        }
        StrategyVariant::Composable => {
            let (native_to_input, output_to_native, assets) = balancer_routes(variant, routes)?;
            let call = ComposableChefStrategy::initializeCall {
                flags: [true, false],
                nativeToInputRoute: native_to_input,
                outputToNativeRoute: output_to_native,
                assets,
                chef: required(variant, strategy.chef, "chef")?,
                poolId: U256::from(required(variant, strategy.pool_id, "pool_id")?),
                commonAddresses: common,
            };
            Ok(call.abi_encode().into())
        }
    }
}

/// Calldata registering one extra reward token on the strategy.
pub fn add_reward_token(
    variant: StrategyVariant,
    reward: &RewardRegistration,
) -> Result<Bytes, DeployError> {
    let (steps, assets) = reward.route.pool_steps().ok_or_else(|| {
        DeployError::ArgumentShape {
            variant,
            reason: String::from("reward route must be a pool-hop route"),
        }
    })?;

    let call = IStrategyRewards::addRewardTokenCall {
        token: reward.token,
        route: batch_swap_steps(steps),
        assets,
        routeToNative: reward.route_to_native.clone(),
        slippageBp: U256::from(reward.slippage_bp),
    };
    Ok(call.abi_encode().into())
}

fn common_addresses(vault: Address, platform: &PlatformAddresses) -> CommonAddresses {
    CommonAddresses {
        vault,
        router: platform.router,
        keeper: platform.keeper,
        strategist: platform.strategist,
        feeRecipient: platform.fee_recipient,
        feeConfig: platform.fee_config,
    }
}

fn required<T>(
    variant: StrategyVariant,
    value: Option<T>,
    field: &str,
) -> Result<T, DeployError> {
    value.ok_or_else(|| DeployError::ArgumentShape {
        variant,
        reason: format!("{} is required", field),
    })
}

fn solidly_hops(
    variant: StrategyVariant,
    route: &Option<SwapRoute>,
    field: &str,
) -> Result<Vec<SwapHop>, DeployError> {
    let route = route.as_ref().ok_or_else(|| DeployError::ArgumentShape {
        variant,
        reason: format!("{} route is required", field),
    })?;

    let tuples = route.token_tuples().ok_or_else(|| DeployError::ArgumentShape {
        variant,
        reason: format!("{} must be a token-hop route", field),
    })?;

    Ok(tuples
        .into_iter()
        .map(|(token_in, token_out, stable)| SwapHop {
            tokenIn: token_in,
            tokenOut: token_out,
            stable,
        })
        .collect())
}

fn batch_swap_steps(steps: Vec<(alloy::primitives::B256, u64, u64)>) -> Vec<BatchSwapStep> {
    steps
        .into_iter()
        .map(|(pool_id, index_in, index_out)| BatchSwapStep {
            poolId: pool_id,
            assetInIndex: U256::from(index_in),
            assetOutIndex: U256::from(index_out),
        })
        .collect()
}

fn pool_route(
    variant: StrategyVariant,
    route: &Option<SwapRoute>,
    field: &str,
) -> Result<(Vec<BatchSwapStep>, Vec<Address>), DeployError> {
    let route = route.as_ref().ok_or_else(|| DeployError::ArgumentShape {
        variant,
        reason: format!("{} route is required", field),
    })?;

    let (steps, assets) = route.pool_steps().ok_or_else(|| DeployError::ArgumentShape {
        variant,
        reason: format!("{} must be a pool-hop route", field),
    })?;

    Ok((batch_swap_steps(steps), assets))
}

/// Both balancer routes plus the bundled asset lists, output side first.
fn balancer_routes(
    variant: StrategyVariant,
    routes: &RouteSet,
) -> Result<(Vec<BatchSwapStep>, Vec<BatchSwapStep>, Vec<Vec<Address>>), DeployError> {
    let (native_to_input, input_assets) =
        pool_route(variant, &routes.native_to_input, "native_to_input")?;
    let (output_to_native, output_assets) =
        pool_route(variant, &routes.output_to_native, "output_to_native")?;

    Ok((
        native_to_input,
        output_to_native,
        vec![output_assets, input_assets],
    ))
}
