//! # Swap service
//!
//! Composes the directory, scanner, pricing engine and executor into the three operations
//! exposed to callers. Amounts cross this boundary as human decimal strings.

/// Human-unit amount conversion
pub mod amount;

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

use crate::chain::{ChainReader, ChainWriter};
use crate::config::{ChainContracts, Config};
use crate::error::{RouterError, RouterResult};
use crate::execute::{SwapMode, SwapOrder, TradeExecutor};
use crate::models::token::Token;
use crate::route::{price_routes, validate_path};
use crate::scan::scan_pools;
use crate::tokens::{TokenDirectory, TokenListSource};

pub use amount::{format_amount, min_amount_out, parse_amount, MAX_SLIPPAGE_BPS};

/// Listed token symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensResponse {
    /// Symbols in directory order
    pub tokens: Vec<String>,
}

/// Input of [`SwapService::quote`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    /// Symbol paid
    pub from_token: String,
    /// Human amount paid
    pub from_amount: String,
    /// Symbol received
    pub to_token: String,
    /// Also execute the quoted route
    #[serde(default)]
    pub execute: bool,
    /// Shortfall below the router's expected output accepted when executing, in basis points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage_bps: Option<u16>,
}

/// Output of [`SwapService::quote`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Human amount received
    pub amount: String,
    /// Symbols along the chosen route
    pub token_path: Vec<String>,
    /// Transactions sent when the quote was executed
    pub tx_hashes: Vec<TxHash>,
}

/// Input of [`SwapService::swap`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParams {
    /// Symbols from source to destination
    pub token_path: Vec<String>,
    /// Human input amount, exact or maximum
    pub from_amount: String,
    /// Human output amount, minimum or exact
    pub to_amount: String,
    /// Receiver of the output
    pub to_address: Address,
    /// Unix time after which the swap reverts
    pub deadline: u64,
    /// Which amount is fixed
    #[serde(default)]
    pub swap_type: SwapMode,
}

/// Output of [`SwapService::swap`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    /// Approval, if one was needed, then the swap
    pub tx_hashes: Vec<TxHash>,
}

/// Quotes and swaps against the chain `chain` is connected to
#[derive(Debug)]
pub struct SwapService<C, S> {
    /// Chain handle
    chain: C,
    /// Token directory cache
    directory: TokenDirectory<S>,
    /// Runtime settings
    config: Config,
}

impl<C, S> SwapService<C, S>
where
    C: ChainReader + ChainWriter,
    S: TokenListSource,
{
    /// Create a new service
    #[must_use]
    pub const fn new(chain: C, directory: TokenDirectory<S>, config: Config) -> Self {
        Self {
            chain,
            directory,
            config,
        }
    }

    /// The chain handle
    #[must_use]
    pub const fn chain(&self) -> &C {
        &self.chain
    }

    /// Lists the symbols tradable on the connected chain.
    ///
    /// # Returns
    ///
    /// Every listed symbol in directory order
    ///
    /// # Errors
    /// * `UnsupportedChain` or `DirectoryFetch` if the directory cannot be loaded
    pub async fn list_tokens(&self) -> RouterResult<TokensResponse> {
        let chain_id = self.chain.chain_id().await?;
        let tokens = self.directory.ensure_loaded(chain_id).await?;
        Ok(TokensResponse {
            tokens: tokens.symbols().to_vec(),
        })
    }

    /// Prices `from_amount` of `from_token` into `to_token` over the best route.
    ///
    /// A pure read unless `execute` is set. Then the route is swapped exact-input and paid to
    /// the signer. The minimum output is what the router itself reports for the route, fee
    /// included, less `slippage_bps` (the configured default when unset).
    ///
    /// # Arguments
    ///
    /// * `params` - Tokens, human input amount and the execution switch
    ///
    /// # Returns
    ///
    /// The quoted output in human units, the route's symbols and any transaction hashes
    ///
    /// # Errors
    /// * `UnknownToken`, `InvalidRequest`, `InvalidAmount` for bad input
    /// * `NoRoute` if no path has the liquidity
    /// * Executor errors when executing
    pub async fn quote(&self, params: QuoteParams) -> RouterResult<QuoteResponse> {
        let slippage_bps = params.slippage_bps.unwrap_or(self.config.slippage_bps);
        if params.execute && slippage_bps > MAX_SLIPPAGE_BPS {
            return Err(RouterError::InvalidRequest(format!(
                "slippage {slippage_bps} bps exceeds 100%"
            )));
        }

        let chain_id = self.chain.chain_id().await?;
        let contracts = ChainContracts::for_chain(chain_id)?;
        let tokens = self.directory.ensure_loaded(chain_id).await?;

        let source = self.directory.resolve_symbol(chain_id, &params.from_token).await?;
        let destination = self.directory.resolve_symbol(chain_id, &params.to_token).await?;
        if source.address == destination.address {
            return Err(RouterError::InvalidRequest(
                "quote tokens must differ".to_string(),
            ));
        }
        let amount_in = parse_amount(&params.from_amount, source.decimals)?;

        let scan = scan_pools(&self.chain, contracts.factory, &tokens, &source, &destination).await?;
        let route = price_routes(&source, &destination, amount_in, &scan, self.config.pricing)?;

        let tx_hashes = if params.execute {
            let path = route.addresses();
            let expected = self
                .chain
                .amounts_out(contracts.router, amount_in, &path)
                .await?
                .last()
                .copied()
                .ok_or_else(|| RouterError::Rpc("router returned no amounts".to_string()))?;
            let amount_out = min_amount_out(expected, slippage_bps)?;
            log::info!(
                "service::quote: Executing {route:?}, router expects {expected}, minimum {amount_out}"
            );

            let order = SwapOrder {
                mode: SwapMode::ExactInput,
                amount_in,
                amount_out,
                path,
                recipient: self.chain.owner()?,
                deadline: deadline_in(self.config.deadline_secs),
            };
            TradeExecutor::new(&self.chain)
                .execute_swap(contracts.router, &order)
                .await?
        } else {
            Vec::new()
        };

        Ok(QuoteResponse {
            amount: format_amount(route.amount_out, destination.decimals)?,
            token_path: route.symbols(),
            tx_hashes,
        })
    }

    /// Swaps along `token_path` with the given bounds.
    ///
    /// # Arguments
    ///
    /// * `params` - Symbol path, human bounds, recipient, deadline and which side is exact
    ///
    /// # Returns
    ///
    /// The approval hash, if one was needed, then the swap hash
    ///
    /// # Errors
    /// * `InvalidRoute` if the path is too short or repeats a symbol, before any network call
    /// * `UnknownToken`, `InvalidAmount` for bad input
    /// * Executor errors
    pub async fn swap(&self, params: SwapParams) -> RouterResult<SwapResponse> {
        validate_path(&params.token_path)?;

        let chain_id = self.chain.chain_id().await?;
        let contracts = ChainContracts::for_chain(chain_id)?;

        let mut path: Vec<Token> = Vec::with_capacity(params.token_path.len());
        for symbol in &params.token_path {
            path.push(self.directory.resolve_symbol(chain_id, symbol).await?);
        }
        let (Some(source), Some(destination)) = (path.first(), path.last()) else {
            return Err(RouterError::InvalidRoute("empty token path".to_string()));
        };

        let order = SwapOrder {
            mode: params.swap_type,
            amount_in: parse_amount(&params.from_amount, source.decimals)?,
            amount_out: parse_amount(&params.to_amount, destination.decimals)?,
            path: path.iter().map(|token| token.address).collect(),
            recipient: params.to_address,
            deadline: params.deadline,
        };

        let tx_hashes = TradeExecutor::new(&self.chain)
            .execute_swap(contracts.router, &order)
            .await?;
        Ok(SwapResponse { tx_hashes })
    }
}

/// Unix time `secs` from now
#[must_use]
pub fn deadline_in(secs: u64) -> u64 {
    chrono::Utc::now()
        .timestamp()
        .unsigned_abs()
        .saturating_add(secs)
}
