use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use vault_core::core::bits::Address;
use vault_core::deployment::{
    error::DeployError,
    params::DeploymentConfig,
    report::{DeploymentReport, DeploymentStep, StepKind, StepStatus},
};

use crate::{
    client::{CommitResult, DeployClient},
    factory::CloneFactoryClient,
    init_calldata,
    predictor::Reservation,
};

/// Steps every deployment performs before any reward registrations.
const REQUIRED_STEP_COUNT: usize = 5;

/// Deployment stages in strict execution order. A stage is only entered
/// once its transaction confirmed and passed verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipelineStage {
    Unstarted,
    VaultCloned,
    StrategyCloned,
    VaultInitialized,
    StrategyInitialized,
    OwnershipTransferred,
    RewardsConfigured,
    Complete,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unstarted => "unstarted",
            Self::VaultCloned => "vault cloned",
            Self::StrategyCloned => "strategy cloned",
            Self::VaultInitialized => "vault initialized",
            Self::StrategyInitialized => "strategy initialized",
            Self::OwnershipTransferred => "ownership transferred",
            Self::RewardsConfigured => "rewards configured",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Where the pipeline is. `Failed` is terminal and names the stage whose
/// transition broke together with the cause.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PipelineState {
    At(PipelineStage),
    Failed {
        at: PipelineStage,
        cause: DeployError,
    },
}

/// Drives one vault and strategy pair from nothing to a fully wired,
/// owner-transferred deployment.
///
/// Transactions are issued strictly one at a time, each awaited to its
/// receipt before the next is sent. The first failure is terminal: the
/// remaining steps are skipped and recorded as such, nothing is retried.
pub struct InitializationPipeline {
    config: Arc<DeploymentConfig>,
    client: DeployClient,
    factory: CloneFactoryClient,
    state: PipelineState,
    vault: Option<Reservation>,
    strategy: Option<Reservation>,
}

impl InitializationPipeline {
    pub fn new(config: Arc<DeploymentConfig>, client: DeployClient) -> Self {
        let factory = CloneFactoryClient::new(
            client.clone(),
            config.factory.address,
            config.factory.prediction,
        );
        Self {
            config,
            client,
            factory,
            state: PipelineState::At(PipelineStage::Unstarted),
            vault: None,
            strategy: None,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Ordered step plan for this config: the five required steps plus one
    /// reward registration per configured reward.
    fn plan(&self) -> Vec<StepKind> {
        let mut kinds = vec![
            StepKind::CloneVault,
            StepKind::CloneStrategy,
            StepKind::InitializeVault,
            StepKind::InitializeStrategy,
            StepKind::TransferOwnership,
        ];
        kinds.extend(self.config.rewards.iter().map(|_| StepKind::RegisterReward));
        kinds
    }

    fn target_stage(&self, kind: StepKind) -> PipelineStage {
        match kind {
            StepKind::CloneVault => PipelineStage::VaultCloned,
            StepKind::CloneStrategy => PipelineStage::StrategyCloned,
            StepKind::InitializeVault => PipelineStage::VaultInitialized,
            StepKind::InitializeStrategy => PipelineStage::StrategyInitialized,
            StepKind::TransferOwnership => PipelineStage::OwnershipTransferred,
            StepKind::RegisterReward => PipelineStage::RewardsConfigured,
        }
    }

    /// Run the whole deployment. The report always comes back, carrying
    /// the terminal cause and the skipped remainder when the run fails.
    pub async fn run(&mut self, cancel: CancellationToken) -> DeploymentReport {
        let mut report =
            DeploymentReport::new(self.config.chain.clone(), self.config.vault.name.clone());

        let mut steps: Vec<DeploymentStep> =
            self.plan().into_iter().map(DeploymentStep::pending).collect();

        let mut failure: Option<DeployError> = None;
        let mut cancelled = false;

        if let Err(cause) = self.config.validate() {
            tracing::error!(%cause, "Deployment config failed validation, nothing was sent");
            self.state = PipelineState::Failed {
                at: PipelineStage::Unstarted,
                cause: cause.clone(),
            };
            failure = Some(cause);
        } else {
            tracing::info!(
                chain = %self.config.chain,
                vault = %self.config.vault.name,
                variant = %self.config.strategy.variant,
                "⚙️ Starting deployment"
            );
        }

        for index in 0..steps.len() {
            if failure.is_some() {
                break;
            }
            if cancel.is_cancelled() {
                tracing::warn!("Cancellation requested, no further steps will be issued");
                cancelled = true;
                break;
            }

            let kind = steps[index].kind;
            let target = self.target_stage(kind);
            steps[index].mark_sent();

            match self.execute_step(kind, index).await {
                Ok(commit) if commit.is_confirmed() => {
                    steps[index].mark_confirmed(
                        commit.tx_hash,
                        commit.mined_address,
                        commit.gas_spent,
                    );
                    self.state = PipelineState::At(target);
                    tracing::info!(
                        step = %kind,
                        stage = %target,
                        tx_hash = %commit.tx_hash,
                        "✅ Step confirmed"
                    );
                }
                Ok(commit) => {
                    steps[index].mark_reverted(commit.tx_hash, commit.gas_spent);
                    let cause = DeployError::TransactionReverted {
                        step: kind,
                        tx_hash: commit.tx_hash,
                    };
                    tracing::error!(step = %kind, tx_hash = %commit.tx_hash, "Step reverted");
                    self.state = PipelineState::Failed {
                        at: target,
                        cause: cause.clone(),
                    };
                    failure = Some(cause);
                }
                Err(cause) => {
                    tracing::error!(step = %kind, %cause, "Step failed");
                    self.state = PipelineState::Failed {
                        at: target,
                        cause: cause.clone(),
                    };
                    failure = Some(cause);
                }
            }
        }

        for step in steps
            .iter_mut()
            .filter(|step| step.status == StepStatus::Pending)
        {
            step.mark_skipped();
        }

        if failure.is_none() && !cancelled {
            self.state = PipelineState::At(PipelineStage::Complete);
        }

        report.vault = self.vault.map(|reservation| reservation.address);
        report.strategy = self.strategy.map(|reservation| reservation.address);
        report.failure = failure;
        for step in steps {
            report.record(step);
        }

        report
    }

    async fn execute_step(
        &mut self,
        kind: StepKind,
        index: usize,
    ) -> Result<CommitResult, DeployError> {
        match kind {
            StepKind::CloneVault => self.step_clone_vault().await,
            StepKind::CloneStrategy => self.step_clone_strategy().await,
            StepKind::InitializeVault => self.step_initialize_vault().await,
            StepKind::InitializeStrategy => self.step_initialize_strategy().await,
            StepKind::TransferOwnership => self.step_transfer_ownership().await,
            StepKind::RegisterReward => {
                self.step_register_reward(index - REQUIRED_STEP_COUNT).await
            }
        }
    }

    async fn step_clone_vault(&mut self) -> Result<CommitResult, DeployError> {
        let (reservation, commit) = self.factory.clone_vault().await?;
        if commit.is_confirmed() {
            CloneFactoryClient::verify_reservation(StepKind::CloneVault, &reservation, &commit)?;
            self.vault = Some(reservation);
        }
        Ok(commit)
    }

    async fn step_clone_strategy(&mut self) -> Result<CommitResult, DeployError> {
        let (reservation, commit) = self
            .factory
            .clone_strategy(self.config.implementation)
            .await?;
        if commit.is_confirmed() {
            CloneFactoryClient::verify_reservation(StepKind::CloneStrategy, &reservation, &commit)?;
            self.strategy = Some(reservation);
        }
        Ok(commit)
    }

    async fn step_initialize_vault(&mut self) -> Result<CommitResult, DeployError> {
        let vault = self.vault_address()?;
        // The strategy reservation closes the circular dependency between
        // the two initializers, its clone step has already proven the
        // reservation equals the mined address.
        let strategy = self.strategy_address()?;
        let calldata = init_calldata::vault_initialize(strategy, &self.config.vault);
        Ok(self.client.send_call(vault, calldata).await?)
    }

    async fn step_initialize_strategy(&mut self) -> Result<CommitResult, DeployError> {
        let vault = self.vault_address()?;
        let strategy = self.strategy_address()?;
        let calldata = init_calldata::strategy_initialize(
            vault,
            &self.config.platform,
            &self.config.strategy,
        )?;
        Ok(self.client.send_call(strategy, calldata).await?)
    }

    async fn step_transfer_ownership(&mut self) -> Result<CommitResult, DeployError> {
        let vault = self.vault_address()?;
        let calldata = init_calldata::transfer_ownership(self.config.vault_owner);
        Ok(self.client.send_call(vault, calldata).await?)
    }

    async fn step_register_reward(&mut self, slot: usize) -> Result<CommitResult, DeployError> {
        let strategy = self.strategy_address()?;
        let reward = self
            .config
            .rewards
            .get(slot)
            .ok_or_else(|| DeployError::Other(format!("no reward configured at slot {}", slot)))?;
        let calldata = init_calldata::add_reward_token(self.config.strategy.variant, reward)?;
        Ok(self.client.send_call(strategy, calldata).await?)
    }

    fn vault_address(&self) -> Result<Address, DeployError> {
        self.vault
            .map(|reservation| reservation.address)
            .ok_or_else(|| DeployError::Other(String::from("vault address is not reserved yet")))
    }

    fn strategy_address(&self) -> Result<Address, DeployError> {
        self.strategy
            .map(|reservation| reservation.address)
            .ok_or_else(|| {
                DeployError::Other(String::from("strategy address is not reserved yet"))
            })
    }
}

#[cfg(test)]
pub mod test {
    use std::sync::Arc;

    use alloy::{primitives::Bytes, sol_types::SolCall};

    use vault_core::core::test_util::{
        get_mock_address_1, get_mock_address_2, get_mock_address_3, get_mock_lp_token,
        get_mock_native_token, get_mock_output_token, get_mock_pool_id,
    };
    use vault_core::deployment::params::{
        DeploymentConfig, FactoryParams, PlatformAddresses, PredictionMode, RewardRegistration,
        RouteSet, StrategyParams, StrategyVariant, VaultParams, DEFAULT_APPROVAL_DELAY,
        DEFAULT_REWARD_SLIPPAGE_BP,
    };
    use vault_core::routes::route::SwapRoute;

    use super::*;
    use crate::contracts::{IStrategyRewards, StakedGaugeStrategy, SwapHop, Vault};
    use crate::predictor::derive_create_address;
    use crate::test_util::{mock_deploy_client, MockCall, MockDeployClient};

    fn factory_address() -> Address {
        get_mock_address_1()
    }

    fn implementation_address() -> Address {
        get_mock_address_2()
    }

    fn platform() -> PlatformAddresses {
        PlatformAddresses {
            router: get_mock_address_1(),
            keeper: get_mock_address_2(),
            strategist: get_mock_address_3(),
            fee_recipient: get_mock_address_1(),
            fee_config: get_mock_address_2(),
        }
    }

    fn one_hop() -> SwapRoute {
        SwapRoute::token_hops(vec![(
            get_mock_output_token(),
            get_mock_native_token(),
            false,
        )])
    }

    fn config_base(strategy: StrategyParams, rewards: Vec<RewardRegistration>) -> DeploymentConfig {
        DeploymentConfig::builder()
            .chain("fantom")
            .factory(FactoryParams {
                address: factory_address(),
                prediction: PredictionMode::StaticCall,
            })
            .implementation(implementation_address())
            .vault(VaultParams {
                name: String::from("Moo Equalizer BTC-FTM"),
                symbol: String::from("mooEqualizerBTC-FTM"),
                approval_delay: DEFAULT_APPROVAL_DELAY,
            })
            .strategy(strategy)
            .platform(platform())
            .vault_owner(get_mock_address_3())
            .rewards(rewards)
            .build()
            .expect("Failed to build test config")
    }

    fn plain_config() -> DeploymentConfig {
        config_base(
            StrategyParams {
                variant: StrategyVariant::Plain,
                want: get_mock_lp_token(),
                gauge: Some(get_mock_address_3()),
                staker: None,
                chef: None,
                pool_id: None,
                routes: RouteSet {
                    output_to_native: Some(one_hop()),
                    output_to_lp0: Some(one_hop()),
                    output_to_lp1: Some(one_hop()),
                    native_to_input: None,
                },
            },
            vec![],
        )
    }

    fn staker_config() -> DeploymentConfig {
        config_base(
            StrategyParams {
                variant: StrategyVariant::Staker,
                want: get_mock_lp_token(),
                gauge: Some(get_mock_address_3()),
                staker: Some(get_mock_address_2()),
                chef: None,
                pool_id: None,
                routes: RouteSet {
                    output_to_native: Some(one_hop()),
                    output_to_lp0: Some(one_hop()),
                    output_to_lp1: Some(SwapRoute::token_hops(vec![
                        (get_mock_output_token(), get_mock_native_token(), false),
                        (get_mock_native_token(), get_mock_lp_token(), false),
                    ])),
                    native_to_input: None,
                },
            },
            vec![],
        )
    }

    fn balancer_config_with_reward() -> DeploymentConfig {
        let reward_assets = vec![get_mock_output_token(), get_mock_native_token()];
        config_base(
            StrategyParams {
                variant: StrategyVariant::Balancer,
                want: get_mock_lp_token(),
                gauge: None,
                staker: None,
                chef: Some(get_mock_address_3()),
                pool_id: Some(99),
                routes: RouteSet {
                    output_to_native: Some(SwapRoute::pool_hops(
                        vec![(get_mock_pool_id(), 0, 1)],
                        vec![get_mock_output_token(), get_mock_native_token()],
                    )),
                    output_to_lp0: None,
                    output_to_lp1: None,
                    native_to_input: Some(SwapRoute::pool_hops(
                        vec![],
                        vec![get_mock_native_token()],
                    )),
                },
            },
            vec![RewardRegistration {
                token: get_mock_output_token(),
                route: SwapRoute::pool_hops(vec![(get_mock_pool_id(), 0, 1)], reward_assets),
                route_to_native: Bytes::from(vec![0u8; 32]),
                slippage_bp: DEFAULT_REWARD_SLIPPAGE_BP,
            }],
        )
    }

    async fn run_pipeline(
        config: DeploymentConfig,
        mock_setup: impl FnOnce(&MockDeployClient),
    ) -> (InitializationPipeline, DeploymentReport, Vec<MockCall>) {
        let (mock, client) = mock_deploy_client(get_mock_address_3());
        mock_setup(&mock);
        let mut pipeline = InitializationPipeline::new(Arc::new(config), client);
        let report = pipeline.run(CancellationToken::new()).await;
        let calls = mock.calls();
        (pipeline, report, calls)
    }

    #[tokio::test]
    async fn test_plain_deployment_runs_every_step_in_order() {
        let (pipeline, report, calls) = run_pipeline(plain_config(), |_| {}).await;

        assert_eq!(*pipeline.state(), PipelineState::At(PipelineStage::Complete));
        assert!(report.is_fully_successful());
        assert_eq!(report.steps.len(), 5);
        assert!(report.step(StepKind::RegisterReward).is_none());

        let vault = report.vault.expect("Vault address must be recorded");
        let strategy = report.strategy.expect("Strategy address must be recorded");
        assert_eq!(vault, derive_create_address(factory_address(), 1));
        assert_eq!(strategy, derive_create_address(factory_address(), 2));

        assert_eq!(calls.len(), 5);
        assert!(matches!(calls[0], MockCall::CloneVault { .. }));
        assert!(
            matches!(calls[1], MockCall::CloneContract { implementation, .. }
                if implementation == implementation_address())
        );

        match &calls[2] {
            MockCall::Call { to, calldata } => {
                assert_eq!(*to, vault);
                let decoded = Vault::initializeCall::abi_decode(calldata)
                    .expect("Vault initializer must decode");
                assert_eq!(decoded.strategy, strategy);
            }
            other => panic!("Expected vault initialization, got {:?}", other),
        }

        match &calls[3] {
            MockCall::Call { to, .. } => assert_eq!(*to, strategy),
            other => panic!("Expected strategy initialization, got {:?}", other),
        }

        match &calls[4] {
            MockCall::Call { to, calldata } => {
                assert_eq!(*to, vault);
                let decoded = Vault::transferOwnershipCall::abi_decode(calldata)
                    .expect("Ownership transfer must decode");
                assert_eq!(decoded.newOwner, get_mock_address_3());
            }
            other => panic!("Expected ownership transfer, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_staker_deployment_preserves_route_hops_on_the_wire() {
        let (pipeline, report, calls) = run_pipeline(staker_config(), |_| {}).await;

        assert_eq!(*pipeline.state(), PipelineState::At(PipelineStage::Complete));
        assert!(report.is_fully_successful());

        let calldata = match &calls[3] {
            MockCall::Call { calldata, .. } => calldata,
            other => panic!("Expected strategy initialization, got {:?}", other),
        };
        let decoded = StakedGaugeStrategy::initializeCall::abi_decode(calldata)
            .expect("Staker initializer must decode");

        assert_eq!(decoded.gaugeStaker, get_mock_address_2());
        assert_eq!(
            decoded.outputToLp1Route,
            vec![
                SwapHop {
                    tokenIn: get_mock_output_token(),
                    tokenOut: get_mock_native_token(),
                    stable: false,
                },
                SwapHop {
                    tokenIn: get_mock_native_token(),
                    tokenOut: get_mock_lp_token(),
                    stable: false,
                },
            ]
        );
        assert_eq!(
            decoded.commonAddresses.vault,
            report.vault.expect("Vault address must be recorded")
        );
    }

    #[tokio::test]
    async fn test_interleaved_clone_aborts_the_run() {
        let (pipeline, report, calls) = run_pipeline(plain_config(), |mock| {
            mock.inject_nonce_conflict();
        })
        .await;

        match pipeline.state() {
            PipelineState::Failed { at, cause } => {
                assert_eq!(*at, PipelineStage::VaultCloned);
                assert!(matches!(
                    cause,
                    DeployError::AddressMismatch {
                        step: StepKind::CloneVault,
                        ..
                    }
                ));
            }
            other => panic!("Expected failed state, got {:?}", other),
        }

        assert!(!report.is_fully_successful());
        assert!(report.failure.is_some());
        assert!(
            !calls
                .iter()
                .any(|call| matches!(call, MockCall::CloneContract { .. })),
            "Strategy clone must never be issued after a mismatch"
        );
        assert!(report.steps[1..]
            .iter()
            .all(|step| step.status == StepStatus::Skipped));
    }

    #[tokio::test]
    async fn test_strategy_init_revert_contains_the_failure() {
        let strategy_address = derive_create_address(factory_address(), 2);
        let (pipeline, report, calls) = run_pipeline(balancer_config_with_reward(), |mock| {
            mock.revert_calls_to(strategy_address);
        })
        .await;

        match pipeline.state() {
            PipelineState::Failed { at, cause } => {
                assert_eq!(*at, PipelineStage::StrategyInitialized);
                assert!(matches!(
                    cause,
                    DeployError::TransactionReverted {
                        step: StepKind::InitializeStrategy,
                        ..
                    }
                ));
            }
            other => panic!("Expected failed state, got {:?}", other),
        }

        // Everything before the revert stays confirmed and addressable
        assert_eq!(
            report
                .step(StepKind::InitializeVault)
                .expect("Vault initialization must be recorded")
                .status,
            StepStatus::Confirmed
        );
        assert_eq!(
            report
                .step(StepKind::InitializeStrategy)
                .expect("Strategy initialization must be recorded")
                .status,
            StepStatus::Reverted
        );
        assert_eq!(
            report
                .step(StepKind::TransferOwnership)
                .expect("Ownership transfer must be recorded")
                .status,
            StepStatus::Skipped
        );
        assert_eq!(
            report
                .step(StepKind::RegisterReward)
                .expect("Reward registration must be recorded")
                .status,
            StepStatus::Skipped
        );
        assert!(report.vault.is_some());

        let reward_selector = IStrategyRewards::addRewardTokenCall::SELECTOR;
        assert!(
            !calls.iter().any(|call| matches!(
                call,
                MockCall::Call { calldata, .. } if calldata.len() >= 4 && calldata[..4] == reward_selector
            )),
            "No reward registration may be sent after a failure"
        );
    }

    #[tokio::test]
    async fn test_reward_registration_follows_ownership_transfer() {
        let (pipeline, report, calls) = run_pipeline(balancer_config_with_reward(), |_| {}).await;

        assert_eq!(*pipeline.state(), PipelineState::At(PipelineStage::Complete));
        assert!(report.is_fully_successful());
        assert_eq!(report.steps.len(), 6);

        let reward_call = match &calls[5] {
            MockCall::Call { to, calldata } => {
                assert_eq!(
                    *to,
                    report.strategy.expect("Strategy address must be recorded")
                );
                IStrategyRewards::addRewardTokenCall::abi_decode(calldata)
                    .expect("Reward registration must decode")
            }
            other => panic!("Expected reward registration, got {:?}", other),
        };
        assert_eq!(reward_call.token, get_mock_output_token());
        assert_eq!(
            reward_call.slippageBp,
            alloy::primitives::U256::from(DEFAULT_REWARD_SLIPPAGE_BP)
        );
    }

    #[tokio::test]
    async fn test_invalid_config_sends_nothing() {
        let mut config = plain_config();
        config.vault_owner = Address::ZERO;
        config.platform.keeper = Address::ZERO;

        let (pipeline, report, calls) = run_pipeline(config, |_| {}).await;

        match pipeline.state() {
            PipelineState::Failed { at, cause } => {
                assert_eq!(*at, PipelineStage::Unstarted);
                match cause {
                    DeployError::ConfigValidation { missing } => {
                        assert!(missing.contains(&String::from("vault_owner")));
                        assert!(missing.contains(&String::from("platform.keeper")));
                    }
                    other => panic!("Expected validation cause, got {:?}", other),
                }
            }
            other => panic!("Expected failed state, got {:?}", other),
        }

        assert!(calls.is_empty());
        assert!(report
            .steps
            .iter()
            .all(|step| step.status == StepStatus::Skipped));
    }

    #[tokio::test]
    async fn test_cancellation_skips_remaining_steps_without_failure() {
        let (mock, client) = mock_deploy_client(get_mock_address_3());
        let mut pipeline = InitializationPipeline::new(Arc::new(plain_config()), client);

        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = pipeline.run(cancel).await;

        assert_eq!(*pipeline.state(), PipelineState::At(PipelineStage::Unstarted));
        assert!(report.failure.is_none());
        assert!(!report.is_fully_successful());
        assert!(report
            .steps
            .iter()
            .all(|step| step.status == StepStatus::Skipped));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_initializer_is_rejected_downstream() {
        let (_mock, client) = mock_deploy_client(get_mock_address_3());
        let config = Arc::new(plain_config());
        let mut pipeline = InitializationPipeline::new(config.clone(), client.clone());
        let report = pipeline.run(CancellationToken::new()).await;
        assert!(report.is_fully_successful());

        // A second initialize against the already-initialized vault reverts
        let vault = report.vault.expect("Vault address must be recorded");
        let strategy = report.strategy.expect("Strategy address must be recorded");
        let commit = client
            .send_call(vault, init_calldata::vault_initialize(strategy, &config.vault))
            .await
            .expect("Mock transport never fails");
        assert!(!commit.is_confirmed());
    }

    #[tokio::test]
    async fn test_nonce_derived_mode_completes_with_same_addresses() {
        let mut config = plain_config();
        config.factory.prediction = PredictionMode::NonceDerived;

        let (pipeline, report, _calls) = run_pipeline(config, |_| {}).await;

        assert_eq!(*pipeline.state(), PipelineState::At(PipelineStage::Complete));
        assert_eq!(report.vault, Some(derive_create_address(factory_address(), 1)));
        assert_eq!(
            report.strategy,
            Some(derive_create_address(factory_address(), 2))
        );
    }

    /// An example of how the pipeline is wired against a live endpoint.
    #[tokio::test]
    #[ignore = "This is only conceptual example that cannot be run, but should compile"]
    async fn test_pipeline_sbe() {
        use alloy::providers::{DynProvider, ProviderBuilder};

        use crate::client::RpcDeployClient;

        let provider = ProviderBuilder::new()
            .connect("nowhere")
            .await
            .expect("Failed to connect to RPC");

        let client = DeployClient::new(Arc::new(RpcDeployClient::new(
            DynProvider::new(provider),
            get_mock_address_3(),
        )));

        let mut pipeline = InitializationPipeline::new(Arc::new(plain_config()), client);
        let report = pipeline.run(CancellationToken::new()).await;
        assert!(report.is_fully_successful());
    }
}
