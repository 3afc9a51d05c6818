//! # Token Directory
//!
//! Per-chain symbol and address lookup, filled once from a [`TokenListSource`] and never
//! refreshed for the lifetime of the directory. Restart the process to pick up list changes.

/// Token-list sources
pub mod source;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use alloy::primitives::Address;

use crate::error::{RouterError, RouterResult};
use crate::models::token::Token;

pub use source::{HttpTokenList, StaticTokenList, TokenListSource};

/// Lookup tables for one chain. Read-only once built.
#[derive(Debug, Default)]
pub struct ChainTokens {
    /// Symbol to token; a later duplicate symbol replaces an earlier one
    by_symbol: HashMap<String, Token>,
    /// Address to token. Addresses compare by value, so lookups are case-insensitive
    by_address: HashMap<Address, Token>,
    /// Symbols in list order, first occurrence only
    symbols: Vec<String>,
}

impl ChainTokens {
    /// Builds both lookup tables from a token list
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut table = Self::default();
        for token in tokens {
            if !table.by_symbol.contains_key(&token.symbol) {
                table.symbols.push(token.symbol.clone());
            }
            table.by_address.insert(token.address, token.clone());
            table.by_symbol.insert(token.symbol.clone(), token);
        }
        table
    }

    /// Token for `symbol`, if listed
    #[must_use]
    pub fn by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.by_symbol.get(symbol)
    }

    /// Token at `address`, if listed
    #[must_use]
    pub fn by_address(&self, address: &Address) -> Option<&Token> {
        self.by_address.get(address)
    }

    /// All listed symbols in list order
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

/// Fill-once cache of [`ChainTokens`] keyed by chain id.
///
/// Two callers racing to load the same chain may both fetch; the first table stored wins
/// and the other is dropped.
#[derive(Debug)]
pub struct TokenDirectory<S> {
    /// Where lists are fetched from
    source: S,
    /// Loaded chains
    chains: RwLock<HashMap<u64, Arc<ChainTokens>>>,
}

impl<S: TokenListSource> TokenDirectory<S> {
    /// Create an empty directory backed by `source`
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            chains: RwLock::new(HashMap::new()),
        }
    }

    /// Create a directory with `chain_id` already populated from `tokens`
    #[must_use]
    pub fn with_tokens(source: S, chain_id: u64, tokens: Vec<Token>) -> Self {
        let directory = Self::new(source);
        directory
            .chains
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chain_id, Arc::new(ChainTokens::new(tokens)));
        directory
    }

    /// Loads the chain's token list if it has not been loaded yet and returns its tables.
    ///
    /// # Errors
    /// * `UnsupportedChain` / `DirectoryFetch` from the source on first load
    pub async fn ensure_loaded(&self, chain_id: u64) -> RouterResult<Arc<ChainTokens>> {
        if let Some(tokens) = self.cached(chain_id) {
            return Ok(tokens);
        }

        let tokens = self.source.fetch(chain_id).await?;
        log::info!(
            "tokens::ensure_loaded: Loaded {} tokens for chain {chain_id}",
            tokens.len()
        );

        let mut chains = self.chains.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            chains
                .entry(chain_id)
                .or_insert_with(|| Arc::new(ChainTokens::new(tokens))),
        ))
    }

    /// Resolves a symbol on `chain_id`.
    ///
    /// # Errors
    /// * `UnknownToken` if the symbol is not listed
    /// * Any error from [`Self::ensure_loaded`]
    pub async fn resolve_symbol(&self, chain_id: u64, symbol: &str) -> RouterResult<Token> {
        self.ensure_loaded(chain_id)
            .await?
            .by_symbol(symbol)
            .cloned()
            .ok_or_else(|| RouterError::UnknownToken {
                symbol: symbol.to_string(),
                chain_id,
            })
    }

    /// Resolves an address on `chain_id`.
    ///
    /// # Errors
    /// * `UnknownToken` if the address is not listed
    /// * Any error from [`Self::ensure_loaded`]
    pub async fn resolve_address(&self, chain_id: u64, address: Address) -> RouterResult<Token> {
        self.ensure_loaded(chain_id)
            .await?
            .by_address(&address)
            .cloned()
            .ok_or_else(|| RouterError::UnknownToken {
                symbol: address.to_string(),
                chain_id,
            })
    }

    fn cached(&self, chain_id: u64) -> Option<Arc<ChainTokens>> {
        self.chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&chain_id)
            .cloned()
    }
}
