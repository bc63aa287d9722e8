use std::fmt;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::core::bits::{Address, Amount, Symbol, TxHash};
use crate::deployment::error::DeployError;

/// Pipeline step identity, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    CloneVault,
    CloneStrategy,
    InitializeVault,
    InitializeStrategy,
    TransferOwnership,
    RegisterReward,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CloneVault => "vault clone",
            Self::CloneStrategy => "strategy clone",
            Self::InitializeVault => "vault initialization",
            Self::InitializeStrategy => "strategy initialization",
            Self::TransferOwnership => "ownership transfer",
            Self::RegisterReward => "reward registration",
        };
        f.write_str(name)
    }
}

/// Lifecycle of a single step. Steps move Pending, Sent, and then either
/// Confirmed or Reverted exactly once. Steps after a failure or a
/// cancellation become Skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Pending,
    Sent,
    Confirmed,
    Reverted,
    Skipped,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Confirmed => "confirmed",
            Self::Reverted => "reverted",
            Self::Skipped => "skipped",
        };
        f.write_str(name)
    }
}

/// Outcome record for one pipeline step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStep {
    pub kind: StepKind,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<TxHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_spent: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl DeploymentStep {
    pub fn pending(kind: StepKind) -> Self {
        Self {
            kind,
            status: StepStatus::Pending,
            tx_hash: None,
            result_address: None,
            gas_spent: None,
            completed_at: None,
        }
    }

    pub fn mark_sent(&mut self) {
        self.status = StepStatus::Sent;
    }

    pub fn mark_confirmed(
        &mut self,
        tx_hash: TxHash,
        result_address: Option<Address>,
        gas_spent: Option<Amount>,
    ) {
        self.status = StepStatus::Confirmed;
        self.tx_hash = Some(tx_hash);
        self.result_address = result_address;
        self.gas_spent = gas_spent;
        self.completed_at = Some(Utc::now());
    }

    pub fn mark_reverted(&mut self, tx_hash: TxHash, gas_spent: Option<Amount>) {
        self.status = StepStatus::Reverted;
        self.tx_hash = Some(tx_hash);
        self.gas_spent = gas_spent;
        self.completed_at = Some(Utc::now());
    }

    pub fn mark_skipped(&mut self) {
        self.status = StepStatus::Skipped;
        self.completed_at = Some(Utc::now());
    }
}

/// Operator-facing record of one full deployment run.
///
/// The report survives failed runs unchanged: every planned step appears
/// with its final status, and the terminal cause rides along when the run
/// did not finish.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeploymentReport {
    pub chain: Symbol,
    pub vault_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Address>,
    pub steps: Vec<DeploymentStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<DeployError>,
    pub created_at: DateTime<Utc>,
}

impl DeploymentReport {
    pub fn new(chain: Symbol, vault_name: impl Into<String>) -> Self {
        Self {
            chain,
            vault_name: vault_name.into(),
            vault: None,
            strategy: None,
            steps: Vec::new(),
            failure: None,
            created_at: Utc::now(),
        }
    }

    /// Steps are recorded in execution order and never removed.
    pub fn record(&mut self, step: DeploymentStep) {
        self.steps.push(step);
    }

    /// First recorded step of the given kind.
    pub fn step(&self, kind: StepKind) -> Option<&DeploymentStep> {
        self.steps.iter().find(|step| step.kind == kind)
    }

    /// True when every planned step reached Confirmed.
    pub fn is_fully_successful(&self) -> bool {
        self.failure.is_none()
            && !self.steps.is_empty()
            && self
                .steps
                .iter()
                .all(|step| step.status == StepStatus::Confirmed)
    }

    /// Total gas paid across all mined steps, in ether.
    pub fn total_gas_spent(&self) -> Amount {
        self.steps.iter().filter_map(|step| step.gas_spent).sum()
    }

    /// Multi-line summary for the operator log.
    pub fn summarize(&self) -> String {
        let heading = format!("deployment of {} on {}", self.vault_name, self.chain);

        let step_lines = self.steps.iter().map(|step| {
            let mut line = format!("  {:<24} {}", step.kind.to_string(), step.status);
            if let Some(address) = step.result_address {
                line.push_str(&format!(" at {}", address));
            }
            if let Some(tx_hash) = step.tx_hash {
                line.push_str(&format!(" tx {}", tx_hash));
            }
            if let Some(gas_spent) = step.gas_spent {
                line.push_str(&format!(" gas {} ETH", gas_spent));
            }
            line
        });

        let outcome = match &self.failure {
            Some(failure) => format!("  outcome: failed, {}", failure),
            None if self.is_fully_successful() => format!(
                "  outcome: complete, vault {}, strategy {}, total gas {} ETH",
                self.vault.map(|a| a.to_string()).unwrap_or_default(),
                self.strategy.map(|a| a.to_string()).unwrap_or_default(),
                self.total_gas_spent(),
            ),
            None => String::from("  outcome: stopped before completion"),
        };

        std::iter::once(heading)
            .chain(step_lines)
            .chain(std::iter::once(outcome))
            .join("\n")
    }
}
