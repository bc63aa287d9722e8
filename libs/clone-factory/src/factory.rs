use alloy::primitives::Address;

use vault_core::deployment::{error::DeployError, params::PredictionMode, report::StepKind};

use crate::{
    client::{CommitResult, DeployClient},
    predictor::{AddressPredictor, CloneOp, Reservation},
};

/// Clone factory access with the reserve-commit protocol applied.
///
/// Every clone is reserved first, then committed. A confirmed commit must
/// land exactly on its reservation: a different address means another
/// transaction consumed the factory nonce in between, and anything already
/// configured against the reservation would point at a dead address.
pub struct CloneFactoryClient {
    client: DeployClient,
    predictor: AddressPredictor,
    factory: Address,
    prediction: PredictionMode,
}

impl CloneFactoryClient {
    pub fn new(client: DeployClient, factory: Address, prediction: PredictionMode) -> Self {
        let predictor = AddressPredictor::new(client.clone());
        Self {
            client,
            predictor,
            factory,
            prediction,
        }
    }

    pub fn factory_address(&self) -> Address {
        self.factory
    }

    /// Reserve the vault clone address without committing anything.
    pub async fn reserve_vault(&self) -> eyre::Result<Reservation> {
        self.predictor
            .predict(self.factory, self.prediction, CloneOp::Vault)
            .await
    }

    /// Reserve the strategy clone address without committing anything.
    pub async fn reserve_strategy(&self, implementation: Address) -> eyre::Result<Reservation> {
        self.predictor
            .predict(
                self.factory,
                self.prediction,
                CloneOp::Implementation(implementation),
            )
            .await
    }

    /// Reserve, then commit the vault clone.
    pub async fn clone_vault(&self) -> eyre::Result<(Reservation, CommitResult)> {
        let reservation = self.reserve_vault().await?;
        tracing::info!(reserved = %reservation.address, "Cloning vault");
        let commit = self.client.clone_vault(self.factory).await?;
        Ok((reservation, commit))
    }

    /// Reserve, then commit the strategy clone.
    pub async fn clone_strategy(
        &self,
        implementation: Address,
    ) -> eyre::Result<(Reservation, CommitResult)> {
        let reservation = self.reserve_strategy(implementation).await?;
        tracing::info!(
            reserved = %reservation.address,
            implementation = %implementation,
            "Cloning strategy"
        );
        let commit = self.client.clone_contract(self.factory, implementation).await?;
        Ok((reservation, commit))
    }

    /// Prove a confirmed commit landed on its reservation. Reverted
    /// commits carry no address and pass through, the caller records the
    /// revert itself.
    pub fn verify_reservation(
        step: StepKind,
        reservation: &Reservation,
        commit: &CommitResult,
    ) -> Result<(), DeployError> {
        let mined = match commit.mined_address {
            Some(mined) => mined,
            None => return Ok(()),
        };
        if mined != reservation.address {
            tracing::error!(
                %step,
                expected = %reservation.address,
                actual = %mined,
                "Clone landed on an unexpected address"
            );
            return Err(DeployError::AddressMismatch {
                step,
                expected: reservation.address,
                actual: mined,
            });
        }
        Ok(())
    }
}
