//! # Route Pricing Engine
//!
//! Combines the scanner's edges into direct and single-intermediate candidate routes, prices
//! each with constant-product arithmetic and keeps the one with the greatest output.
//!
//! The search is a breadth-2 best-by-value search over a token graph that is built fresh for
//! every request. Path length is bounded to these two shapes.

/// Single-pool pricing
pub mod pricing;
/// Test helpers and utilities
#[cfg(test)]
pub mod test_helpers;

use std::fmt::{self, Debug};
use std::hash::Hash;

use alloy::primitives::{Address, U256};
use itertools::Itertools;

use crate::error::{RouterError, RouterResult};
use crate::models::token::Token;
use crate::scan::{Edge, ScanResult};

pub use pricing::PricingConvention;

/// A priced token path
#[derive(Clone, PartialEq, Eq)]
pub struct Route {
    /// Source, optional intermediate, destination
    pub tokens: Vec<Token>,
    /// Pool used for each hop
    pub pools: Vec<Address>,
    /// Input in the source's smallest unit
    pub amount_in: U256,
    /// Quoted output in the destination's smallest unit
    pub amount_out: U256,
}

impl Route {
    /// Builds the route through consecutive `hops`
    fn through(hops: &[&Edge], amount_in: U256, amount_out: U256) -> Self {
        let tokens = hops
            .first()
            .map(|first| first.token_in.clone())
            .into_iter()
            .chain(hops.iter().map(|hop| hop.token_out.clone()))
            .collect();
        Self {
            tokens,
            pools: hops.iter().map(|hop| hop.pool).collect(),
            amount_in,
            amount_out,
        }
    }

    /// Symbols along the route
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.tokens.iter().map(|token| token.symbol.clone()).collect()
    }

    /// Token addresses along the route, as the router contract takes them
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.tokens.iter().map(|token| token.address).collect()
    }

    /// Number of pool trades
    #[must_use]
    pub fn hops(&self) -> usize {
        self.pools.len()
    }
}

impl Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Route(A > B > C, 100 -> 82)
        write!(
            f,
            "Route({}, {} -> {})",
            self.symbols().join(" > "),
            self.amount_in,
            self.amount_out
        )
    }
}

/// Checks that a token path can be handed to the router: at least two tokens, none repeated.
///
/// # Errors
/// * `InvalidRoute` otherwise
pub fn validate_path<T: Eq + Hash>(path: &[T]) -> RouterResult<()> {
    if path.len() < 2 {
        return Err(RouterError::InvalidRoute(
            "token path must include at least two tokens".to_string(),
        ));
    }
    if !path.iter().all_unique() {
        return Err(RouterError::InvalidRoute(
            "tokens on path must differ".to_string(),
        ));
    }
    Ok(())
}

/// Selects the route from `source` to `destination` with the greatest output for `amount_in`.
///
/// Direct pools are tried before two-hop pairs, each in scan order. A later candidate only
/// replaces the current best if its output is strictly greater, so ties keep the first found.
/// Intermediates are matched by address.
///
/// # Arguments
///
/// * `source` - The token being sold
/// * `destination` - The token being bought
/// * `amount_in` - Input in `source`'s smallest unit
/// * `scan` - Classified edges from [`crate::scan::scan_pools`]
/// * `convention` - How a pool's output is computed
///
/// # Returns
///
/// The winning route with its quoted output
///
/// # Errors
/// * `InvalidRequest` if `source` and `destination` are the same token
/// * `NoRoute` if no candidate produces a positive output
pub fn price_routes(
    source: &Token,
    destination: &Token,
    amount_in: U256,
    scan: &ScanResult,
    convention: PricingConvention,
) -> RouterResult<Route> {
    if source.address == destination.address {
        return Err(RouterError::InvalidRequest(
            "quote tokens must differ".to_string(),
        ));
    }

    let mut best: Option<Route> = None;
    let mut consider = |hops: &[&Edge]| {
        let Some(amount_out) = convention.path_amount_out(hops, amount_in) else {
            return;
        };
        let best_out = best.as_ref().map_or(U256::ZERO, |route| route.amount_out);
        if amount_out > best_out {
            best = Some(Route::through(hops, amount_in, amount_out));
        }
    };

    for direct in &scan.direct {
        consider(&[direct]);
    }

    for from in &scan.from_source {
        for to in &scan.to_destination {
            if from.token_out.address == to.token_in.address {
                consider(&[from, to]);
            }
        }
    }

    match best {
        Some(route) => {
            log::info!("route::price_routes: Best {route:?} via {:?}", route.pools);
            Ok(route)
        }
        None => Err(RouterError::NoRoute),
    }
}
