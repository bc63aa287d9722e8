use std::env;

use alloy::{
    primitives::utils::format_units,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use clap::Parser;
use eyre::Context;
use tokio_util::sync::CancellationToken;

use vault_core::{core::logging::log_init, init_log};
use vault_maker::{
    app::{config_loader::ConfigLoader, deployer::Deployer},
    cli::Cli,
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    init_log!(cli.log_path.clone());

    tracing::info!("--==| Vault Maker |==--");

    let signer = env::var("VAULT_MAKER_PRIVATE_KEY")
        .expect("VAULT_MAKER_PRIVATE_KEY environment variable must be defined")
        .parse::<PrivateKeySigner>()
        .context("Failed to parse private key")?;

    let deployer_address = signer.address();

    let config = ConfigLoader::new().load(&cli)?;
    let deployment = &config.deployment;

    tracing::info!(
        "✅ Deployment config ok: chain: {}, factory: {}, vault: {}, strategy: {}",
        deployment.chain,
        deployment.factory.address,
        deployment.vault.name,
        deployment.strategy.variant
    );

    let provider = ProviderBuilder::new()
        .wallet(signer)
        .connect(&config.rpc_url)
        .await?;

    let balance = provider.get_balance(deployer_address).await?;
    let balance = format_units(balance, "ether").context("Failed to format balance")?;

    tracing::info!(
        "💰 Deploying from {} with balance {} on {}",
        deployer_address,
        balance,
        config.rpc_url
    );

    let dry_run = config.dry_run;
    let deployer = Deployer::new(config, DynProvider::new(provider), deployer_address);

    if dry_run {
        deployer.dry_run().await?;
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping before the next step");
            signal_cancel.cancel();
        }
    });

    let report = deployer.deploy(cancel).await?;

    if let (Some(vault), Some(strategy)) = (report.vault, report.strategy) {
        tracing::info!(
            "✅ Vault deployed ok: {} at {} with strategy {}",
            report.vault_name,
            vault,
            strategy
        );
    }

    Ok(())
}
