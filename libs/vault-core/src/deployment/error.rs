use derive_builder::UninitializedFieldError;
use eyre::Report;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::bits::{Address, TxHash};
use crate::deployment::params::StrategyVariant;
use crate::deployment::report::StepKind;

/// Failure taxonomy for a deployment run.
///
/// Transport and signing failures coming up through eyre fold into
/// `Other`. The typed variants carry what the operator needs to act on,
/// and they serialize into the deployment report as-is.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployError {
    #[error("configuration missing or invalid: {}", missing.join(", "))]
    ConfigValidation { missing: Vec<String> },

    #[error("{step} minted {actual}, reserved address was {expected}")]
    AddressMismatch {
        step: StepKind,
        expected: Address,
        actual: Address,
    },

    #[error("{step} transaction {tx_hash} reverted")]
    TransactionReverted { step: StepKind, tx_hash: TxHash },

    #[error("cannot encode arguments for {variant} strategy: {reason}")]
    ArgumentShape {
        variant: StrategyVariant,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl From<Report> for DeployError {
    fn from(report: Report) -> Self {
        DeployError::Other(format!("{:?}", report))
    }
}

impl From<UninitializedFieldError> for DeployError {
    fn from(err: UninitializedFieldError) -> Self {
        DeployError::ConfigValidation {
            missing: vec![err.field_name().to_string()],
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = DeployError::ConfigValidation {
            missing: vec![String::from("factory.address"), String::from("vault_owner")],
        };
        assert_eq!(
            err.to_string(),
            "configuration missing or invalid: factory.address, vault_owner"
        );
    }

    #[test]
    fn test_transport_failures_fold_into_other() {
        let report = eyre::eyre!("connection refused");
        let err: DeployError = report.into();
        assert!(matches!(err, DeployError::Other(message) if message.contains("connection refused")));
    }
}
