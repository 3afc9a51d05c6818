//! # Pool Scanner
//!
//! Walks a factory's pair registry and classifies every usable pair relative to a requested
//! source and destination.

/// Edge and reserve types
pub mod types;

use alloy::primitives::Address;

use crate::chain::ChainReader;
use crate::error::RouterResult;
use crate::models::token::Token;
use crate::tokens::ChainTokens;

pub use types::{Edge, EdgeKind, Reserves, ScanResult};

/// Scans every pair registered with `factory`.
///
/// Pairs are read strictly one after another, index 0 upward, which keeps load on the node
/// bounded at the cost of latency linear in the pair count. A pair is skipped when either
/// token is not in `tokens` or either reserve is zero.
///
/// # Arguments
///
/// * `reader` - Chain to read from
/// * `factory` - The pair registry to walk
/// * `tokens` - The chain's directory; pairs with unlisted tokens are skipped
/// * `source` - The token being sold
/// * `destination` - The token being bought
///
/// # Returns
///
/// Direct, from-source and to-destination edges, each in scan order
///
/// # Errors
/// * If any remote read fails; the scan is abandoned
pub async fn scan_pools<R: ChainReader + ?Sized>(
    reader: &R,
    factory: Address,
    tokens: &ChainTokens,
    source: &Token,
    destination: &Token,
) -> RouterResult<ScanResult> {
    let pair_count = reader.all_pairs_length(factory).await?;
    log::info!("scan::scan_pools: Scanning {pair_count} pairs for {source} -> {destination}");

    let mut result = ScanResult::default();
    for index in 0..pair_count {
        let pair = reader.pair_at(factory, index).await?;
        let (address0, address1) = reader.pair_tokens(pair).await?;

        let (Some(token0), Some(token1)) =
            (tokens.by_address(&address0), tokens.by_address(&address1))
        else {
            log::debug!("scan::scan_pools: Pair {index} ({pair}) has an unlisted token, skipping");
            continue;
        };

        let reserves = reader.reserves(pair).await?;
        if reserves.is_empty() {
            log::debug!("scan::scan_pools: Pair {index} ({pair}) has no liquidity, skipping");
            continue;
        }

        log::debug!(
            "scan::scan_pools: Available pair {index} ({pair}): {} {token0} / {} {token1}",
            reserves.reserve0,
            reserves.reserve1
        );

        if let Some(edge) = Edge::classify(pair, token0, token1, reserves, source, destination) {
            result.push(edge);
        }
    }

    log::info!(
        "scan::scan_pools: Found {} direct, {} from-source and {} to-destination pools",
        result.direct.len(),
        result.from_source.len(),
        result.to_destination.len()
    );
    Ok(result)
}
