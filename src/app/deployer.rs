use std::sync::Arc;

use alloy::providers::DynProvider;
use eyre::{eyre, Context};
use tokio_util::sync::CancellationToken;

use clone_factory::{
    client::{DeployClient, RpcDeployClient},
    factory::CloneFactoryClient,
    pipeline::InitializationPipeline,
};
use vault_core::core::bits::Address;
use vault_core::core::json_file_async::write_json_to_file_async;
use vault_core::deployment::report::DeploymentReport;

use crate::app::config::AppConfig;
use crate::app::verifier::{LogOnlyVerifier, SourceVerifier};

/// Drives one deployment run end to end: pipeline, report file, optional
/// source verification.
pub struct Deployer {
    config: AppConfig,
    client: DeployClient,
}

impl Deployer {
    pub fn new(config: AppConfig, provider: DynProvider, deployer_address: Address) -> Self {
        let client = DeployClient::new(Arc::new(RpcDeployClient::new(provider, deployer_address)));
        Self { config, client }
    }

    /// Build over a preconstructed chain client.
    pub fn with_client(config: AppConfig, client: DeployClient) -> Self {
        Self { config, client }
    }

    /// Reserve both clone addresses and report them, nothing is sent.
    pub async fn dry_run(&self) -> eyre::Result<()> {
        let deployment = &self.config.deployment;
        let factory = CloneFactoryClient::new(
            self.client.clone(),
            deployment.factory.address,
            deployment.factory.prediction,
        );

        let vault = factory.reserve_vault().await?;
        let strategy = factory.reserve_strategy(deployment.implementation).await?;

        tracing::info!(
            "✅ Dry run: vault would clone at {}, basis {:?}",
            vault.address,
            vault.basis
        );
        tracing::info!(
            "✅ Dry run: strategy would clone at {}, basis {:?}",
            strategy.address,
            strategy.basis
        );

        Ok(())
    }

    /// Run the pipeline and persist the report. The report file is written
    /// for failed runs too, before the failure is raised.
    pub async fn deploy(&self, cancel: CancellationToken) -> eyre::Result<DeploymentReport> {
        let deployment = self.config.deployment.clone();

        let mut pipeline = InitializationPipeline::new(deployment.clone(), self.client.clone());
        let report = pipeline.run(cancel).await;

        write_json_to_file_async(&self.config.output_file, &report)
            .await
            .context("Failed to write deployment report")?;

        tracing::info!("Report written to {}", self.config.output_file);
        tracing::info!("\n{}", report.summarize());

        if let Some(failure) = &report.failure {
            return Err(eyre!("Deployment failed: {}", failure));
        }

        if deployment.verify {
            if let (Some(vault), Some(strategy)) = (report.vault, report.strategy) {
                let verifier = LogOnlyVerifier;
                verifier.verify_vault(vault, &deployment).await?;
                verifier.verify_strategy(strategy, &deployment).await?;
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
pub mod test {
    use vault_core::core::bits::Symbol;
    use vault_core::core::json_file::read_from_json_file;
    use vault_core::core::test_util::{
        get_mock_address_1, get_mock_address_2, get_mock_address_3, get_mock_lp_token,
        get_mock_native_token, get_mock_output_token,
    };
    use vault_core::deployment::params::{
        DeploymentConfig, FactoryParams, PlatformAddresses, PredictionMode, RouteSet,
        StrategyParams, StrategyVariant, VaultParams, DEFAULT_APPROVAL_DELAY,
    };
    use vault_core::routes::route::SwapRoute;

    use super::*;
    use clone_factory::test_util::mock_deploy_client;

    fn one_hop() -> SwapRoute {
        SwapRoute::token_hops(vec![(
            get_mock_output_token(),
            get_mock_native_token(),
            false,
        )])
    }

    fn app_config(output_file: String) -> AppConfig {
        let deployment = DeploymentConfig {
            chain: Symbol::from("fantom"),
            factory: FactoryParams {
                address: get_mock_address_1(),
                prediction: PredictionMode::StaticCall,
            },
            implementation: get_mock_address_2(),
            vault: VaultParams {
                name: String::from("Moo Test"),
                symbol: String::from("mooTest"),
                approval_delay: DEFAULT_APPROVAL_DELAY,
            },
            strategy: StrategyParams {
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
            platform: PlatformAddresses {
                router: get_mock_address_1(),
                keeper: get_mock_address_2(),
                strategist: get_mock_address_3(),
                fee_recipient: get_mock_address_1(),
                fee_config: get_mock_address_2(),
            },
            vault_owner: get_mock_address_3(),
            rewards: vec![],
            verify: false,
        };

        AppConfig {
            deployment: Arc::new(deployment),
            rpc_url: String::from(""),
            output_file,
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn test_deploy_persists_the_report() {
        let output_file = std::env::temp_dir()
            .join(format!("vault-maker-report-{}.json", std::process::id()))
            .to_string_lossy()
            .into_owned();

        let (_mock, client) = mock_deploy_client(get_mock_address_3());
        let deployer = Deployer::with_client(app_config(output_file.clone()), client);

        let report = deployer
            .deploy(CancellationToken::new())
            .await
            .expect("Deployment against the mock must succeed");
        assert!(report.is_fully_successful());

        let persisted: DeploymentReport =
            read_from_json_file(&output_file).expect("Report file must parse back");
        assert_eq!(persisted, report);

        std::fs::remove_file(&output_file).expect("Failed to clean up report file");
    }

    #[tokio::test]
    async fn test_dry_run_sends_nothing() {
        let (mock, client) = mock_deploy_client(get_mock_address_3());
        let deployer = Deployer::with_client(
            app_config(String::from("unused.json")),
            client,
        );

        deployer.dry_run().await.expect("Dry run must succeed");
        assert!(mock.calls().is_empty());
    }
}
