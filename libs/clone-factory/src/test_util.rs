use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolCall,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::dec;

use vault_core::core::bits::TxHash;

use crate::{
    client::{CommitResult, CommitStatus, DeployClient, DeployClientMethods},
    contracts::{
        BalancerChefStrategy, ComposableChefStrategy, SolidlyGaugeStrategy, StakedGaugeStrategy,
        Vault,
    },
    predictor::derive_create_address,
};

/// One committed transaction the mock saw, in commit order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    CloneVault {
        factory: Address,
        minted: Address,
    },
    CloneContract {
        factory: Address,
        implementation: Address,
        minted: Address,
    },
    Call {
        to: Address,
        calldata: Bytes,
    },
}

struct MockState {
    /// Per-account creation nonces. Contract accounts begin life at nonce 1.
    nonces: HashMap<Address, u64>,
    revert_targets: HashSet<Address>,
    initialized: HashSet<Address>,
    inject_nonce_conflict: bool,
    calls: Vec<MockCall>,
    tx_counter: u8,
}

impl MockState {
    fn nonce_of(&self, account: Address) -> u64 {
        self.nonces.get(&account).copied().unwrap_or(1)
    }

    fn bump_nonce(&mut self, account: Address) -> u64 {
        let nonce = self.nonce_of(account);
        self.nonces.insert(account, nonce + 1);
        nonce
    }

    fn next_tx_hash(&mut self) -> TxHash {
        self.tx_counter += 1;
        TxHash::with_last_byte(self.tx_counter)
    }

    fn confirmed(&mut self, mined_address: Option<Address>) -> CommitResult {
        CommitResult {
            status: CommitStatus::Confirmed,
            tx_hash: self.next_tx_hash(),
            mined_address,
            gas_spent: Some(dec!(0.001)),
        }
    }

    fn reverted(&mut self) -> CommitResult {
        CommitResult {
            status: CommitStatus::Reverted,
            tx_hash: self.next_tx_hash(),
            mined_address: None,
            gas_spent: Some(dec!(0.001)),
        }
    }
}

/// In-memory chain double that behaves like a clone factory: predictions
/// read the factory nonce, commits consume it, initializers are once-only.
pub struct MockDeployClient {
    deployer: Address,
    state: Mutex<MockState>,
}

impl MockDeployClient {
    pub fn new(deployer: Address) -> Self {
        Self {
            deployer,
            state: Mutex::new(MockState {
                nonces: HashMap::new(),
                revert_targets: HashSet::new(),
                initialized: HashSet::new(),
                inject_nonce_conflict: false,
                calls: Vec::new(),
                tx_counter: 0,
            }),
        }
    }

    /// Every transaction sent to `target` will revert.
    pub fn revert_calls_to(&self, target: Address) {
        self.state.lock().revert_targets.insert(target);
    }

    /// Consume one extra factory nonce right before the next clone commit,
    /// as a concurrent transaction from the same account would.
    pub fn inject_nonce_conflict(&self) {
        self.state.lock().inject_nonce_conflict = true;
    }

    /// Committed transactions in the order they were sent.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }
}

/// Build a mock and its client handle in one go.
pub fn mock_deploy_client(deployer: Address) -> (Arc<MockDeployClient>, DeployClient) {
    let mock = Arc::new(MockDeployClient::new(deployer));
    let client = DeployClient::new(mock.clone());
    (mock, client)
}

fn is_initialize_call(calldata: &[u8]) -> bool {
    if calldata.len() < 4 {
        return false;
    }
    let selector: [u8; 4] = [calldata[0], calldata[1], calldata[2], calldata[3]];
    [
        Vault::initializeCall::SELECTOR,
        SolidlyGaugeStrategy::initializeCall::SELECTOR,
        StakedGaugeStrategy::initializeCall::SELECTOR,
        BalancerChefStrategy::initializeCall::SELECTOR,
        ComposableChefStrategy::initializeCall::SELECTOR,
    ]
    .contains(&selector)
}

#[async_trait]
impl DeployClientMethods for MockDeployClient {
    fn deployer_address(&self) -> Address {
        self.deployer
    }

    async fn pending_nonce(&self, account: Address) -> eyre::Result<u64> {
        Ok(self.state.lock().nonce_of(account))
    }

    async fn predict_clone_vault(&self, factory: Address) -> eyre::Result<Address> {
        let state = self.state.lock();
        Ok(derive_create_address(factory, state.nonce_of(factory)))
    }

    async fn predict_clone_contract(
        &self,
        factory: Address,
        _implementation: Address,
    ) -> eyre::Result<Address> {
        let state = self.state.lock();
        Ok(derive_create_address(factory, state.nonce_of(factory)))
    }

    async fn clone_vault(&self, factory: Address) -> eyre::Result<CommitResult> {
        let mut state = self.state.lock();
        if state.revert_targets.contains(&factory) {
            return Ok(state.reverted());
        }
        if state.inject_nonce_conflict {
            state.inject_nonce_conflict = false;
            state.bump_nonce(factory);
        }
        let nonce = state.bump_nonce(factory);
        let minted = derive_create_address(factory, nonce);
        state.calls.push(MockCall::CloneVault { factory, minted });
        Ok(state.confirmed(Some(minted)))
    }

    async fn clone_contract(
        &self,
        factory: Address,
        implementation: Address,
    ) -> eyre::Result<CommitResult> {
        let mut state = self.state.lock();
        if state.revert_targets.contains(&factory) {
            return Ok(state.reverted());
        }
        if state.inject_nonce_conflict {
            state.inject_nonce_conflict = false;
            state.bump_nonce(factory);
        }
        let nonce = state.bump_nonce(factory);
        let minted = derive_create_address(factory, nonce);
        state.calls.push(MockCall::CloneContract {
            factory,
            implementation,
            minted,
        });
        Ok(state.confirmed(Some(minted)))
    }

    async fn send_call(&self, to: Address, calldata: Bytes) -> eyre::Result<CommitResult> {
        let mut state = self.state.lock();
        state.calls.push(MockCall::Call {
            to,
            calldata: calldata.clone(),
        });
        if state.revert_targets.contains(&to) {
            return Ok(state.reverted());
        }
        if is_initialize_call(&calldata) && !state.initialized.insert(to) {
            // Initializers are once-only, a second call reverts
            return Ok(state.reverted());
        }
        Ok(state.confirmed(None))
    }
}
