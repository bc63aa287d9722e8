use std::sync::Arc;

use vault_core::core::json_file::read_from_json_file;
use vault_core::deployment::params::DeploymentConfig;

use crate::app::address_book::AddressBook;
use crate::app::config::{AppConfig, ConfigBuildError, DeploymentManifest};
use crate::cli::Cli;

/// Assembles the application config from the manifest file, the address
/// book, and command line overrides, then validates the result.
pub struct ConfigLoader;

impl ConfigLoader {
    pub const DEFAULT_MANIFEST_PATH: &'static str = "configs/deployment.json";
    pub const DEFAULT_ADDRESS_BOOK_PATH: &'static str = "configs/address-book.json";
    pub const DEFAULT_OUTPUT_PATH: &'static str = "deployment-report.json";
    pub const DEFAULT_RPC_URL: &'static str = "http://127.0.0.1:8545";

    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, cli: &Cli) -> Result<AppConfig, ConfigBuildError> {
        let manifest_path = cli
            .file
            .as_deref()
            .unwrap_or(Self::DEFAULT_MANIFEST_PATH);
        let mut manifest: DeploymentManifest = read_from_json_file(manifest_path)?;

        self.apply_cli_overrides(&mut manifest, cli);

        let book = self.load_address_book(cli)?;
        let deployment = self.merge(&manifest, &book)?;
        deployment.validate()?;

        let rpc_url = cli
            .rpc_url
            .clone()
            .or_else(|| manifest.rpc_url.clone())
            .or_else(|| {
                book.chain(&manifest.chain)
                    .and_then(|entry| entry.rpc_url.clone())
            })
            .unwrap_or_else(|| String::from(Self::DEFAULT_RPC_URL));

        let output_file = cli
            .output_file
            .clone()
            .unwrap_or_else(|| String::from(Self::DEFAULT_OUTPUT_PATH));

        Ok(AppConfig {
            deployment: Arc::new(deployment),
            rpc_url,
            output_file,
            dry_run: cli.dry_run,
        })
    }

    fn apply_cli_overrides(&self, manifest: &mut DeploymentManifest, cli: &Cli) {
        if let Some(chain) = &cli.chain {
            manifest.chain = chain.clone();
        }
    }

    fn load_address_book(&self, cli: &Cli) -> Result<AddressBook, ConfigBuildError> {
        match &cli.address_book {
            Some(path) => Ok(AddressBook::load(path)?),
            None => {
                // The default book is optional, a complete manifest needs none
                if std::path::Path::new(Self::DEFAULT_ADDRESS_BOOK_PATH).exists() {
                    Ok(AddressBook::load(Self::DEFAULT_ADDRESS_BOOK_PATH)?)
                } else {
                    Ok(AddressBook::default())
                }
            }
        }
    }

    /// Manifest entries win, the address book fills what the manifest
    /// leaves out for its chain.
    fn merge(
        &self,
        manifest: &DeploymentManifest,
        book: &AddressBook,
    ) -> Result<DeploymentConfig, ConfigBuildError> {
        let entry = book.chain(&manifest.chain);

        let factory = manifest
            .factory
            .or_else(|| entry.and_then(|e| e.factory))
            .ok_or(ConfigBuildError::UninitializedField("factory"))?;

        let implementation = manifest
            .implementation
            .ok_or(ConfigBuildError::UninitializedField("implementation"))?;

        let platform = manifest
            .platform
            .or_else(|| entry.map(|e| e.platform))
            .ok_or(ConfigBuildError::UninitializedField("platform"))?;

        let vault_owner = manifest
            .vault_owner
            .or_else(|| entry.map(|e| e.vault_owner))
            .ok_or(ConfigBuildError::UninitializedField("vault_owner"))?;

        Ok(DeploymentConfig {
            chain: manifest.chain.clone(),
            factory,
            implementation,
            vault: manifest.vault.clone(),
            strategy: manifest.strategy.clone(),
            platform,
            vault_owner,
            rewards: manifest.rewards.clone(),
            verify: manifest.verify,
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
