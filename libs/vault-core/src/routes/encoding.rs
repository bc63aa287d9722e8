use alloy::{
    primitives::{Bytes, B256, U256},
    sol_types::SolValue,
};

use crate::core::bits::{Address, PoolId};
use crate::routes::route::{PoolHop, RouteError, SwapRoute, TokenHop};

/// Wire form balancer strategies expect when no swap is needed: a single
/// step through the zero pool from asset 0 to asset 0.
const IDENTITY_POOL_STEP: (B256, U256, U256) = (B256::ZERO, U256::ZERO, U256::ZERO);

impl SwapRoute {
    /// Token pair tuples in hop order, `None` for pool-hop routes.
    pub fn token_tuples(&self) -> Option<Vec<(Address, Address, bool)>> {
        match self {
            Self::TokenHops { hops } => Some(
                hops.iter()
                    .map(|hop| (hop.token_in, hop.token_out, hop.stable))
                    .collect(),
            ),
            Self::PoolHops { .. } => None,
        }
    }

    /// Batch swap steps plus the asset list, `None` for token-hop routes.
    ///
    /// An empty pool route comes out as the zero-pool identity step, which
    /// is what the strategies expect on the wire.
    pub fn pool_steps(&self) -> Option<(Vec<(PoolId, u64, u64)>, Vec<Address>)> {
        match self {
            Self::TokenHops { .. } => None,
            Self::PoolHops { hops, assets } => {
                let steps = if hops.is_empty() {
                    vec![(B256::ZERO, 0, 0)]
                } else {
                    hops.iter()
                        .map(|hop| (hop.pool_id, hop.index_in, hop.index_out))
                        .collect()
                };
                Some((steps, assets.clone()))
            }
        }
    }

    /// ABI encoding of the hop list, the shape initializers take on the wire.
    pub fn encode(&self) -> Bytes {
        match self {
            Self::TokenHops { hops } => {
                let tuples: Vec<(Address, Address, bool)> = hops
                    .iter()
                    .map(|hop| (hop.token_in, hop.token_out, hop.stable))
                    .collect();
                tuples.abi_encode().into()
            }
            Self::PoolHops { hops, .. } => {
                let steps: Vec<(B256, U256, U256)> = if hops.is_empty() {
                    vec![IDENTITY_POOL_STEP]
                } else {
                    hops.iter()
                        .map(|hop| {
                            (
                                hop.pool_id,
                                U256::from(hop.index_in),
                                U256::from(hop.index_out),
                            )
                        })
                        .collect()
                };
                steps.abi_encode().into()
            }
        }
    }

    /// Decode an ABI encoded solidly hop list.
    pub fn decode_token_hops(data: &[u8]) -> Result<SwapRoute, RouteError> {
        let tuples = Vec::<(Address, Address, bool)>::abi_decode(data)
            .map_err(|err| RouteError::Decode(err.to_string()))?;
        Ok(SwapRoute::TokenHops {
            hops: tuples
                .into_iter()
                .map(|(token_in, token_out, stable)| TokenHop {
                    token_in,
                    token_out,
                    stable,
                })
                .collect(),
        })
    }

    /// Decode an ABI encoded batch swap step list. The asset list is not
    /// part of the encoding, the caller supplies it.
    pub fn decode_pool_hops(data: &[u8], assets: Vec<Address>) -> Result<SwapRoute, RouteError> {
        let tuples = Vec::<(B256, U256, U256)>::abi_decode(data)
            .map_err(|err| RouteError::Decode(err.to_string()))?;

        let hops = if tuples.len() == 1 && tuples[0] == IDENTITY_POOL_STEP {
            Vec::new()
        } else {
            tuples
                .into_iter()
                .map(|(pool_id, index_in, index_out)| {
                    Ok(PoolHop {
                        pool_id,
                        index_in: index_in
                            .try_into()
                            .map_err(|err| RouteError::Decode(format!("{}", err)))?,
                        index_out: index_out
                            .try_into()
                            .map_err(|err| RouteError::Decode(format!("{}", err)))?,
                    })
                })
                .collect::<Result<Vec<_>, RouteError>>()?
        };

        Ok(SwapRoute::PoolHops { hops, assets })
    }
}
