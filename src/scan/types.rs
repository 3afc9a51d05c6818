use std::fmt;

use alloy::primitives::{Address, U256};

use crate::chain::contracts::IPlunderPair;
use crate::models::token::Token;

/// Reserves information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserves {
    /// Reserve of token0
    pub reserve0: U256,
    /// Reserve of token1
    pub reserve1: U256,
}

impl Reserves {
    /// Create reserves
    #[must_use]
    pub const fn new(reserve0: U256, reserve1: U256) -> Self {
        Self { reserve0, reserve1 }
    }

    /// A pool with nothing on either side is uninitialised or drained and cannot be routed through
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }
}

impl From<IPlunderPair::getReservesReturn> for Reserves {
    fn from(reserves: IPlunderPair::getReservesReturn) -> Self {
        // uint112 fits in the two low limbs
        let widen = |reserve: &[u64; 2]| U256::from_limbs([reserve[0], reserve[1], 0, 0]);
        Self {
            reserve0: widen(reserves.reserve0.as_limbs()),
            reserve1: widen(reserves.reserve1.as_limbs()),
        }
    }
}

/// How a pool relates to the requested source and destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Holds both the source and the destination
    Direct,
    /// Holds the source and one intermediate token
    FromSource,
    /// Holds one intermediate token and the destination
    ToDestination,
}

/// A pool oriented for one trade direction.
///
/// `reserve_in` is the reserve of `token_in`, `reserve_out` the reserve of `token_out`.
/// Edges are built per request and never cached since reserves move every block.
#[derive(Clone, PartialEq, Eq)]
pub struct Edge {
    /// Pool contract
    pub pool: Address,
    /// Relation to the request
    pub kind: EdgeKind,
    /// Token paid into the pool
    pub token_in: Token,
    /// Token taken out of the pool
    pub token_out: Token,
    /// Pool's reserve of `token_in`
    pub reserve_in: U256,
    /// Pool's reserve of `token_out`
    pub reserve_out: U256,
}

impl Edge {
    /// The token on the far side from the request's endpoints, for one-sided edges
    #[must_use]
    pub const fn intermediate(&self) -> Option<&Token> {
        match self.kind {
            EdgeKind::Direct => None,
            EdgeKind::FromSource => Some(&self.token_out),
            EdgeKind::ToDestination => Some(&self.token_in),
        }
    }

    /// Orients a pool relative to `source` and `destination`.
    ///
    /// Returns `None` when the pool holds neither endpoint, or holds the same token twice.
    #[must_use]
    pub fn classify(
        pool: Address,
        token0: &Token,
        token1: &Token,
        reserves: Reserves,
        source: &Token,
        destination: &Token,
    ) -> Option<Self> {
        if token0.address == token1.address {
            return None;
        }

        let oriented = |token_in: &Token, kind: EdgeKind| {
            let (token_in, token_out, reserve_in, reserve_out) = if token_in.address == token0.address
            {
                (token0, token1, reserves.reserve0, reserves.reserve1)
            } else {
                (token1, token0, reserves.reserve1, reserves.reserve0)
            };
            Self {
                pool,
                kind,
                token_in: token_in.clone(),
                token_out: token_out.clone(),
                reserve_in,
                reserve_out,
            }
        };

        let holds = |token: &Token| token.address == token0.address || token.address == token1.address;

        match (holds(source), holds(destination)) {
            (true, true) => Some(oriented(source, EdgeKind::Direct)),
            (true, false) => Some(oriented(source, EdgeKind::FromSource)),
            (false, true) => {
                let other = if destination.address == token0.address {
                    token1
                } else {
                    token0
                };
                Some(oriented(other, EdgeKind::ToDestination))
            }
            (false, false) => None,
        }
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Edge(0xpool, 1000 A / 500 B)
        write!(
            f,
            "Edge({}, {:?}, {} {} / {} {})",
            self.pool,
            self.kind,
            self.reserve_in,
            self.token_in,
            self.reserve_out,
            self.token_out
        )
    }
}

/// Pools relevant to one request, in scan order within each kind
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Pools holding both endpoints
    pub direct: Vec<Edge>,
    /// Pools holding the source and an intermediate
    pub from_source: Vec<Edge>,
    /// Pools holding an intermediate and the destination
    pub to_destination: Vec<Edge>,
}

impl ScanResult {
    /// Files an edge under its kind
    pub fn push(&mut self, edge: Edge) {
        match edge.kind {
            EdgeKind::Direct => self.direct.push(edge),
            EdgeKind::FromSource => self.from_source.push(edge),
            EdgeKind::ToDestination => self.to_destination.push(edge),
        }
    }

    /// Total number of edges
    #[must_use]
    pub fn len(&self) -> usize {
        self.direct.len() + self.from_source.len() + self.to_destination.len()
    }

    /// Whether no relevant pool was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::route::test_helpers::token;

    fn reserves(reserve0: u64, reserve1: u64) -> Reserves {
        Reserves::new(U256::from(reserve0), U256::from(reserve1))
    }

    #[test]
    fn test_direct_is_oriented_from_source() {
        let (a, b) = (token("A"), token("B"));
        // pool lists B first
        let edge = Edge::classify(Address::ZERO, &b, &a, reserves(500, 1000), &a, &b).unwrap();
        assert_eq!(edge.kind, EdgeKind::Direct);
        assert_eq!(edge.token_in, a);
        assert_eq!(edge.reserve_in, U256::from(1000));
        assert_eq!(edge.reserve_out, U256::from(500));
        assert_eq!(edge.intermediate(), None);
    }

    #[test]
    fn test_one_sided_edges() {
        let (a, b, c) = (token("A"), token("B"), token("C"));

        let from = Edge::classify(Address::ZERO, &b, &a, reserves(7, 3), &a, &c).unwrap();
        assert_eq!(from.kind, EdgeKind::FromSource);
        assert_eq!(from.intermediate(), Some(&b));
        assert_eq!((from.reserve_in, from.reserve_out), (U256::from(3), U256::from(7)));

        let to = Edge::classify(Address::ZERO, &c, &b, reserves(7, 3), &a, &c).unwrap();
        assert_eq!(to.kind, EdgeKind::ToDestination);
        assert_eq!(to.token_in, b);
        assert_eq!(to.token_out, c);
        assert_eq!((to.reserve_in, to.reserve_out), (U256::from(3), U256::from(7)));
    }

    #[test]
    fn test_irrelevant_pool() {
        let (a, b, c, d) = (token("A"), token("B"), token("C"), token("D"));
        assert!(Edge::classify(Address::ZERO, &b, &d, reserves(1, 1), &a, &c).is_none());
        assert!(Edge::classify(Address::ZERO, &a, &a, reserves(1, 1), &a, &c).is_none());
    }

    #[test]
    fn test_empty_reserves() {
        assert!(reserves(0, 10).is_empty());
        assert!(reserves(10, 0).is_empty());
        assert!(!reserves(1, 1).is_empty());
    }
}
