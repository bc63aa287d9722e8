use std::fmt;

use alloy::primitives::Bytes;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::core::bits::{Address, Symbol};
use crate::deployment::error::DeployError;
use crate::routes::route::SwapRoute;

/// Timelock the vault applies to strategy upgrades, in seconds.
pub const DEFAULT_APPROVAL_DELAY: u64 = 21_600;

/// Default slippage allowance for reward swaps, in basis points.
pub const DEFAULT_REWARD_SLIPPAGE_BP: u64 = 100;

/// Which initializer shape the cloned strategy expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyVariant {
    /// Solidly gauge strategy
    Plain,
    /// Solidly gauge strategy routed through a gauge staker
    Staker,
    /// Balancer chef strategy
    Balancer,
    /// Balancer chef strategy over a composable pool
    Composable,
}

impl fmt::Display for StrategyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Staker => "staker",
            Self::Balancer => "balancer",
            Self::Composable => "composable",
        };
        f.write_str(name)
    }
}

/// How the factory's next clone address is computed before committing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMode {
    /// Dry-run the clone entry point and take the address it returns
    #[default]
    StaticCall,
    /// Derive the address from the factory account's pending nonce
    NonceDerived,
}

/// Clone factory the run goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryParams {
    pub address: Address,
    #[serde(default)]
    pub prediction: PredictionMode,
}

/// Vault-side initializer arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultParams {
    pub name: String,
    pub symbol: String,
    #[serde(default = "default_approval_delay")]
    pub approval_delay: u64,
}

fn default_approval_delay() -> u64 {
    DEFAULT_APPROVAL_DELAY
}

/// Platform accounts shared by every strategy on a chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAddresses {
    pub router: Address,
    pub keeper: Address,
    pub strategist: Address,
    pub fee_recipient: Address,
    pub fee_config: Address,
}

/// Swap paths the strategy needs, keyed the way deploy manifests name them.
/// Which entries are required depends on the strategy variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_to_native: Option<SwapRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_to_lp0: Option<SwapRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_to_lp1: Option<SwapRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_to_input: Option<SwapRoute>,
}

/// Strategy-side initializer arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyParams {
    pub variant: StrategyVariant,
    pub want: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gauge: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staker: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chef: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<u64>,
    #[serde(default)]
    pub routes: RouteSet,
}

/// One extra reward token to register on the deployed strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRegistration {
    pub token: Address,
    pub route: SwapRoute,
    #[serde(default = "default_route_to_native")]
    pub route_to_native: Bytes,
    #[serde(default = "default_reward_slippage_bp")]
    pub slippage_bp: u64,
}

fn default_route_to_native() -> Bytes {
    Bytes::from(vec![0u8; 32])
}

fn default_reward_slippage_bp() -> u64 {
    DEFAULT_REWARD_SLIPPAGE_BP
}

/// Everything one deployment run needs, validated once up front and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(
    pattern = "owned",
    build_fn(name = "try_build", error = "DeployError")
)]
pub struct DeploymentConfig {
    #[builder(setter(into))]
    pub chain: Symbol,
    pub factory: FactoryParams,
    pub implementation: Address,
    pub vault: VaultParams,
    pub strategy: StrategyParams,
    pub platform: PlatformAddresses,
    pub vault_owner: Address,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub rewards: Vec<RewardRegistration>,
    #[serde(default)]
    #[builder(default)]
    pub verify: bool,
}

impl DeploymentConfig {
    #[must_use]
    pub fn builder() -> DeploymentConfigBuilder {
        DeploymentConfigBuilder::default()
    }

    /// Fail fast before anything is sent, naming every unset or broken
    /// field in one pass.
    pub fn validate(&self) -> Result<(), DeployError> {
        let mut missing = Vec::new();

        if self.chain.is_empty() {
            missing.push(String::from("chain"));
        }
        if self.factory.address.is_zero() {
            missing.push(String::from("factory.address"));
        }
        if self.implementation.is_zero() {
            missing.push(String::from("implementation"));
        }
        if self.vault_owner.is_zero() {
            missing.push(String::from("vault_owner"));
        }
        if self.vault.name.is_empty() {
            missing.push(String::from("vault.name"));
        }
        if self.vault.symbol.is_empty() {
            missing.push(String::from("vault.symbol"));
        }
        if self.vault.approval_delay == 0 {
            missing.push(String::from("vault.approval_delay"));
        }

        for (field, address) in [
            ("platform.router", self.platform.router),
            ("platform.keeper", self.platform.keeper),
            ("platform.strategist", self.platform.strategist),
            ("platform.fee_recipient", self.platform.fee_recipient),
            ("platform.fee_config", self.platform.fee_config),
        ] {
            if address.is_zero() {
                missing.push(String::from(field));
            }
        }

        if self.strategy.want.is_zero() {
            missing.push(String::from("strategy.want"));
        }

        let routes = &self.strategy.routes;
        match self.strategy.variant {
            StrategyVariant::Plain | StrategyVariant::Staker => {
                if self.strategy.gauge.is_none() {
                    missing.push(String::from("strategy.gauge"));
                }
                if self.strategy.variant == StrategyVariant::Staker
                    && self.strategy.staker.is_none()
                {
                    missing.push(String::from("strategy.staker"));
                }
                for (field, route) in [
                    ("strategy.routes.output_to_native", &routes.output_to_native),
                    ("strategy.routes.output_to_lp0", &routes.output_to_lp0),
                    ("strategy.routes.output_to_lp1", &routes.output_to_lp1),
                ] {
                    note_route(&mut missing, field, route);
                }
            }
            StrategyVariant::Balancer | StrategyVariant::Composable => {
                if self.strategy.chef.is_none() {
                    missing.push(String::from("strategy.chef"));
                }
                if self.strategy.pool_id.is_none() {
                    missing.push(String::from("strategy.pool_id"));
                }
                for (field, route) in [
                    ("strategy.routes.output_to_native", &routes.output_to_native),
                    ("strategy.routes.native_to_input", &routes.native_to_input),
                ] {
                    note_route(&mut missing, field, route);
                }
            }
        }

        for (position, reward) in self.rewards.iter().enumerate() {
            if reward.token.is_zero() {
                missing.push(format!("rewards[{}].token", position));
            }
            if let Err(err) = reward.route.validate(Some(reward.token), None) {
                missing.push(format!("rewards[{}].route ({})", position, err));
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DeployError::ConfigValidation { missing })
        }
    }
}

fn note_route(missing: &mut Vec<String>, field: &str, route: &Option<SwapRoute>) {
    match route {
        None => missing.push(String::from(field)),
        Some(route) => {
            if let Err(err) = route.validate(None, None) {
                missing.push(format!("{} ({})", field, err));
            }
        }
    }
}

impl DeploymentConfigBuilder {
    /// Build and validate in one step.
    pub fn build(self) -> Result<DeploymentConfig, DeployError> {
        let config = self.try_build()?;
        config.validate()?;
        Ok(config)
    }
}
