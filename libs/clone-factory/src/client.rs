use std::sync::Arc;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use eyre::{eyre, OptionExt};
use serde::{Deserialize, Serialize};

use vault_core::core::bits::{Amount, TxHash};

use crate::{
    contracts::VaultFactory,
    util::{gas_spent, pending_nonce},
};

/// Mined-transaction outcome the pipeline inspects before moving on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitStatus {
    Confirmed,
    Reverted,
}

/// What a committed transaction left on-chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    pub status: CommitStatus,
    pub tx_hash: TxHash,
    /// Address minted by a clone commit, absent for plain calls and for
    /// reverted commits.
    pub mined_address: Option<Address>,
    pub gas_spent: Option<Amount>,
}

impl CommitResult {
    pub fn is_confirmed(&self) -> bool {
        matches!(self.status, CommitStatus::Confirmed)
    }
}

/// Narrow chain access the deployment pipeline runs against.
#[async_trait]
pub trait DeployClientMethods {
    fn deployer_address(&self) -> Address;

    async fn pending_nonce(&self, account: Address) -> eyre::Result<u64>;

    /// Dry-run the factory's vault clone and take the address it would mint.
    async fn predict_clone_vault(&self, factory: Address) -> eyre::Result<Address>;

    /// Dry-run the factory's implementation clone.
    async fn predict_clone_contract(
        &self,
        factory: Address,
        implementation: Address,
    ) -> eyre::Result<Address>;

    /// Commit the vault clone and wait for its receipt.
    async fn clone_vault(&self, factory: Address) -> eyre::Result<CommitResult>;

    /// Commit the implementation clone and wait for its receipt.
    async fn clone_contract(
        &self,
        factory: Address,
        implementation: Address,
    ) -> eyre::Result<CommitResult>;

    /// Send raw calldata to a deployed contract and wait for its receipt.
    async fn send_call(&self, to: Address, calldata: Bytes) -> eyre::Result<CommitResult>;
}

/// Cloneable handle over the chain seam.
#[derive(Clone)]
pub struct DeployClient(Arc<dyn DeployClientMethods + Send + Sync + 'static>);

impl DeployClient {
    pub fn new(inner: Arc<dyn DeployClientMethods + Send + Sync + 'static>) -> Self {
        Self(inner)
    }

    pub fn deployer_address(&self) -> Address {
        self.0.deployer_address()
    }

    pub async fn pending_nonce(&self, account: Address) -> eyre::Result<u64> {
        self.0.pending_nonce(account).await
    }

    pub async fn predict_clone_vault(&self, factory: Address) -> eyre::Result<Address> {
        self.0.predict_clone_vault(factory).await
    }

    pub async fn predict_clone_contract(
        &self,
        factory: Address,
        implementation: Address,
    ) -> eyre::Result<Address> {
        self.0.predict_clone_contract(factory, implementation).await
    }

    pub async fn clone_vault(&self, factory: Address) -> eyre::Result<CommitResult> {
        self.0.clone_vault(factory).await
    }

    pub async fn clone_contract(
        &self,
        factory: Address,
        implementation: Address,
    ) -> eyre::Result<CommitResult> {
        self.0.clone_contract(factory, implementation).await
    }

    pub async fn send_call(&self, to: Address, calldata: Bytes) -> eyre::Result<CommitResult> {
        self.0.send_call(to, calldata).await
    }
}

/// Chain seam backed by a real RPC provider with a signing wallet.
pub struct RpcDeployClient {
    provider: DynProvider,
    deployer: Address,
}

impl RpcDeployClient {
    pub fn new(provider: DynProvider, deployer: Address) -> Self {
        Self { provider, deployer }
    }

    fn commit_result(
        &self,
        receipt: &TransactionReceipt,
        mined_address: Option<Address>,
    ) -> CommitResult {
        let status = if receipt.status() {
            CommitStatus::Confirmed
        } else {
            CommitStatus::Reverted
        };
        CommitResult {
            status,
            tx_hash: receipt.transaction_hash,
            mined_address,
            gas_spent: gas_spent(receipt).ok(),
        }
    }

    fn proxy_address(
        &self,
        factory: Address,
        receipt: &TransactionReceipt,
    ) -> eyre::Result<Address> {
        let log_entry = receipt
            .logs()
            .iter()
            .find(|&x| x.address() == factory)
            .ok_or_eyre("Failed to find proxy creation event")?;

        let event = log_entry
            .log_decode::<VaultFactory::ProxyCreated>()
            .map_err(|err| eyre!("Failed to parse log entry: {:?}", err))?;

        Ok(event.inner.proxy)
    }
}

#[async_trait]
impl DeployClientMethods for RpcDeployClient {
    fn deployer_address(&self) -> Address {
        self.deployer
    }

    async fn pending_nonce(&self, account: Address) -> eyre::Result<u64> {
        pending_nonce(&self.provider, account).await
    }

    async fn predict_clone_vault(&self, factory: Address) -> eyre::Result<Address> {
        let factory = VaultFactory::new(factory, self.provider.clone());
        let predicted = factory.cloneVault().from(self.deployer).call().await?;
        Ok(predicted)
    }

    async fn predict_clone_contract(
        &self,
        factory: Address,
        implementation: Address,
    ) -> eyre::Result<Address> {
        let factory = VaultFactory::new(factory, self.provider.clone());
        let predicted = factory
            .cloneContract(implementation)
            .from(self.deployer)
            .call()
            .await?;
        Ok(predicted)
    }

    async fn clone_vault(&self, factory_address: Address) -> eyre::Result<CommitResult> {
        let factory = VaultFactory::new(factory_address, self.provider.clone());
        let receipt = factory
            .cloneVault()
            .from(self.deployer)
            .send()
            .await?
            .get_receipt()
            .await?;

        let mined_address = receipt
            .status()
            .then(|| self.proxy_address(factory_address, &receipt))
            .transpose()?;

        Ok(self.commit_result(&receipt, mined_address))
    }

    async fn clone_contract(
        &self,
        factory_address: Address,
        implementation: Address,
    ) -> eyre::Result<CommitResult> {
        let factory = VaultFactory::new(factory_address, self.provider.clone());
        let receipt = factory
            .cloneContract(implementation)
            .from(self.deployer)
            .send()
            .await?
            .get_receipt()
            .await?;

        let mined_address = receipt
            .status()
            .then(|| self.proxy_address(factory_address, &receipt))
            .transpose()?;

        Ok(self.commit_result(&receipt, mined_address))
    }

    async fn send_call(&self, to: Address, calldata: Bytes) -> eyre::Result<CommitResult> {
        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_to(to)
            .with_input(calldata);

        let receipt = self
            .provider
            .send_transaction(tx)
            .await?
            .get_receipt()
            .await?;

        Ok(self.commit_result(&receipt, None))
    }
}
