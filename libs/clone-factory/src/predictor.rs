use serde::{Deserialize, Serialize};

use vault_core::core::bits::Address;
use vault_core::deployment::params::PredictionMode;

use crate::client::DeployClient;

/// How a reservation was computed, kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionBasis {
    /// The factory returned the address from a dry-run of its clone entry point
    FactoryStaticCall { factory: Address },
    /// The address was derived from the creating account's pending nonce
    AccountNonce { deployer: Address, nonce: u64 },
}

/// Address reserved for a clone before its committing transaction is sent.
///
/// The reservation may be handed to other initializers ahead of the commit,
/// the commit is then required to land exactly on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub address: Address,
    pub basis: PredictionBasis,
}

/// Clone operation to reserve an address for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloneOp {
    Vault,
    Implementation(Address),
}

/// Computes the address a clone will occupy before anything is sent.
#[derive(Clone)]
pub struct AddressPredictor {
    client: DeployClient,
}

impl AddressPredictor {
    pub fn new(client: DeployClient) -> Self {
        Self { client }
    }

    /// Reserve the next clone address under the given mode.
    ///
    /// In static-call mode the factory itself owns the computation. In
    /// nonce mode the address is recomputed from the chain's contract
    /// creation formula over the factory account, which is the account
    /// that mints the clone.
    pub async fn predict(
        &self,
        factory: Address,
        mode: PredictionMode,
        op: CloneOp,
    ) -> eyre::Result<Reservation> {
        match mode {
            PredictionMode::StaticCall => {
                let address = match op {
                    CloneOp::Vault => self.client.predict_clone_vault(factory).await?,
                    CloneOp::Implementation(implementation) => {
                        self.client
                            .predict_clone_contract(factory, implementation)
                            .await?
                    }
                };
                Ok(Reservation {
                    address,
                    basis: PredictionBasis::FactoryStaticCall { factory },
                })
            }
            PredictionMode::NonceDerived => {
                let nonce = self.client.pending_nonce(factory).await?;
                let address = derive_create_address(factory, nonce);
                Ok(Reservation {
                    address,
                    basis: PredictionBasis::AccountNonce {
                        deployer: factory,
                        nonce,
                    },
                })
            }
        }
    }
}

/// CREATE address for `deployer` at `nonce`: keccak over the RLP pair,
/// lower 160 bits.
pub fn derive_create_address(deployer: Address, nonce: u64) -> Address {
    deployer.create(nonce)
}

#[cfg(test)]
pub mod test {
    use alloy::primitives::address;
    use test_case::test_case;

    use super::*;

    #[test_case(1; "first contract creation")]
    #[test_case(2; "second contract creation")]
    #[test_case(115; "later contract creation")]
    fn test_derived_address_is_deterministic(nonce: u64) {
        let deployer = address!("0xd8da6bf26964af9d7eed9e03e53415d37aa96045");

        assert_eq!(
            derive_create_address(deployer, nonce),
            derive_create_address(deployer, nonce)
        );
        assert_ne!(
            derive_create_address(deployer, nonce),
            derive_create_address(deployer, nonce + 1)
        );
    }

    #[test]
    fn test_different_deployers_never_collide() {
        let first = address!("0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
        let second = address!("0xd8da6bf26964af9d7eed9e03e53415d37aa96046");

        assert_ne!(
            derive_create_address(first, 1),
            derive_create_address(second, 1)
        );
    }
}
