use std::sync::Arc;

use eyre::Report;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vault_core::core::bits::{Address, Symbol};
use vault_core::deployment::{
    error::DeployError,
    params::{
        DeploymentConfig, FactoryParams, PlatformAddresses, RewardRegistration, StrategyParams,
        VaultParams,
    },
};

/// Configuration build errors for the deployer application.
#[derive(Debug, Error)]
pub enum ConfigBuildError {
    #[error("Configuration missing or invalid `{0}`")]
    UninitializedField(&'static str),

    #[error("Configuration error `{0}`")]
    Other(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

impl From<Report> for ConfigBuildError {
    fn from(report: Report) -> Self {
        ConfigBuildError::Other(format!("{:?}", report))
    }
}

impl From<std::io::Error> for ConfigBuildError {
    fn from(err: std::io::Error) -> Self {
        ConfigBuildError::FileError(format!("IO error: {:?}", err))
    }
}

impl From<serde_json::Error> for ConfigBuildError {
    fn from(err: serde_json::Error) -> Self {
        ConfigBuildError::FileError(format!("JSON parsing error: {}", err))
    }
}

impl From<DeployError> for ConfigBuildError {
    fn from(err: DeployError) -> Self {
        ConfigBuildError::ValidationError(err.to_string())
    }
}

/// Deployment manifest as written by operators. Platform accounts, the
/// factory, and the vault owner may be omitted and filled from the
/// address book for the manifest's chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeploymentManifest {
    pub chain: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<FactoryParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<Address>,
    pub vault: VaultParams,
    pub strategy: StrategyParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformAddresses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_owner: Option<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewards: Vec<RewardRegistration>,
    #[serde(default)]
    pub verify: bool,
}

/// Everything the deployer binary needs for one run.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub deployment: Arc<DeploymentConfig>,
    pub rpc_url: String,
    pub output_file: String,
    pub dry_run: bool,
}
