use async_trait::async_trait;

use vault_core::core::bits::Address;
use vault_core::deployment::params::DeploymentConfig;

/// Source verification seam for deployed contracts.
///
/// The actual submission goes to an external explorer service. The default
/// implementation only logs what would be submitted, which keeps the
/// deployment flow identical whether or not a verifier backend is wired.
#[async_trait]
pub trait SourceVerifier {
    async fn verify_vault(
        &self,
        address: Address,
        config: &DeploymentConfig,
    ) -> eyre::Result<()>;

    async fn verify_strategy(
        &self,
        address: Address,
        config: &DeploymentConfig,
    ) -> eyre::Result<()>;
}

pub struct LogOnlyVerifier;

#[async_trait]
impl SourceVerifier for LogOnlyVerifier {
    async fn verify_vault(
        &self,
        address: Address,
        config: &DeploymentConfig,
    ) -> eyre::Result<()> {
        tracing::info!(
            %address,
            vault = %config.vault.name,
            chain = %config.chain,
            "Source verification requested for vault"
        );
        Ok(())
    }

    async fn verify_strategy(
        &self,
        address: Address,
        config: &DeploymentConfig,
    ) -> eyre::Result<()> {
        tracing::info!(
            %address,
            variant = %config.strategy.variant,
            chain = %config.chain,
            "Source verification requested for strategy"
        );
        Ok(())
    }
}
