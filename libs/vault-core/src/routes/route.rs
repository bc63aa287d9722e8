use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::bits::{Address, PoolId};

/// One leg of a solidly-style swap path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHop {
    pub token_in: Address,
    pub token_out: Address,
    pub stable: bool,
}

/// One leg of a balancer-style batch swap. Indexes point into the asset
/// list that rides along with the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolHop {
    pub pool_id: PoolId,
    pub index_in: u64,
    pub index_out: u64,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route has no hops and its endpoints are not the same asset")]
    Empty,
    #[error("hop {position} starts at {found}, previous hop ends at {expected}")]
    BrokenChain {
        position: usize,
        expected: Address,
        found: Address,
    },
    #[error("route starts at {found}, expected source {expected}")]
    SourceMismatch { expected: Address, found: Address },
    #[error("route ends at {found}, expected destination {expected}")]
    DestinationMismatch { expected: Address, found: Address },
    #[error("hop {position} swaps asset {index} into itself")]
    DegenerateHop { position: usize, index: u64 },
    #[error("hop {position} references asset {index}, route only carries {assets} assets")]
    IndexOutOfRange {
        position: usize,
        index: u64,
        assets: usize,
    },
    #[error("hop {position} starts at asset {found}, previous hop ends at asset {expected}")]
    BrokenIndexChain {
        position: usize,
        expected: u64,
        found: u64,
    },
    #[error("failed to decode route: {0}")]
    Decode(String),
}

/// Ordered multi-hop swap path handed to strategy initializers.
///
/// Token hops carry explicit token pairs the way solidly routers expect
/// them. Pool hops carry opaque pool identifiers with indexes into a flat
/// asset list the way balancer batch swaps expect them. Hop order is
/// preserved everywhere, reordering a route changes its meaning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwapRoute {
    TokenHops {
        hops: Vec<TokenHop>,
    },
    PoolHops {
        hops: Vec<PoolHop>,
        assets: Vec<Address>,
    },
}

impl SwapRoute {
    pub fn token_hops(hops: Vec<(Address, Address, bool)>) -> Self {
        Self::TokenHops {
            hops: hops
                .into_iter()
                .map(|(token_in, token_out, stable)| TokenHop {
                    token_in,
                    token_out,
                    stable,
                })
                .collect(),
        }
    }

    pub fn pool_hops(hops: Vec<(PoolId, u64, u64)>, assets: Vec<Address>) -> Self {
        Self::PoolHops {
            hops: hops
                .into_iter()
                .map(|(pool_id, index_in, index_out)| PoolHop {
                    pool_id,
                    index_in,
                    index_out,
                })
                .collect(),
            assets,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::TokenHops { hops } => hops.is_empty(),
            Self::PoolHops { hops, .. } => hops.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::TokenHops { hops } => hops.len(),
            Self::PoolHops { hops, .. } => hops.len(),
        }
    }

    /// First asset the route consumes. An empty pool route holds its
    /// single asset, an empty token route holds nothing.
    pub fn source(&self) -> Option<Address> {
        match self {
            Self::TokenHops { hops } => hops.first().map(|hop| hop.token_in),
            Self::PoolHops { hops, assets } => match hops.first() {
                Some(hop) => assets.get(hop.index_in as usize).copied(),
                None => assets.first().copied(),
            },
        }
    }

    /// Last asset the route produces.
    pub fn destination(&self) -> Option<Address> {
        match self {
            Self::TokenHops { hops } => hops.last().map(|hop| hop.token_out),
            Self::PoolHops { hops, assets } => match hops.last() {
                Some(hop) => assets.get(hop.index_out as usize).copied(),
                None => assets.last().copied(),
            },
        }
    }

    /// Check hop chaining and, where known, the route endpoints.
    ///
    /// An empty route passes only when both endpoints resolve to the same
    /// asset, meaning no swap is needed at all.
    pub fn validate(
        &self,
        source: Option<Address>,
        destination: Option<Address>,
    ) -> Result<(), RouteError> {
        if self.is_empty() {
            let src = source.or_else(|| self.source());
            let dst = destination.or_else(|| self.destination());
            return match (src, dst) {
                (Some(src), Some(dst)) if src == dst => Ok(()),
                _ => Err(RouteError::Empty),
            };
        }

        match self {
            Self::TokenHops { hops } => {
                for (position, window) in hops.windows(2).enumerate() {
                    if window[0].token_out != window[1].token_in {
                        return Err(RouteError::BrokenChain {
                            position: position + 1,
                            expected: window[0].token_out,
                            found: window[1].token_in,
                        });
                    }
                }
            }
            Self::PoolHops { hops, assets } => {
                for (position, hop) in hops.iter().enumerate() {
                    for index in [hop.index_in, hop.index_out] {
                        if index as usize >= assets.len() {
                            return Err(RouteError::IndexOutOfRange {
                                position,
                                index,
                                assets: assets.len(),
                            });
                        }
                    }
                    if hop.index_in == hop.index_out {
                        return Err(RouteError::DegenerateHop {
                            position,
                            index: hop.index_in,
                        });
                    }
                }
                for (position, window) in hops.windows(2).enumerate() {
                    if window[0].index_out != window[1].index_in {
                        return Err(RouteError::BrokenIndexChain {
                            position: position + 1,
                            expected: window[0].index_out,
                            found: window[1].index_in,
                        });
                    }
                }
            }
        }

        if let (Some(expected), Some(found)) = (source, self.source()) {
            if expected != found {
                return Err(RouteError::SourceMismatch { expected, found });
            }
        }

        if let (Some(expected), Some(found)) = (destination, self.destination()) {
            if expected != found {
                return Err(RouteError::DestinationMismatch { expected, found });
            }
        }

        Ok(())
    }

    /// Flat asset path for entry points that take a plain address list.
    pub fn to_array(&self) -> Vec<Address> {
        match self {
            Self::TokenHops { hops } => {
                let mut path = Vec::with_capacity(hops.len() + 1);
                if let Some(first) = hops.first() {
                    path.push(first.token_in);
                }
                path.extend(hops.iter().map(|hop| hop.token_out));
                path
            }
            Self::PoolHops { assets, .. } => assets.clone(),
        }
    }
}
