use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use url::Url;

use crate::config::token_list_url;
use crate::error::{RouterError, RouterResult};
use crate::models::token::{Token, TokenList};

/// Where a chain's token list comes from
#[async_trait]
pub trait TokenListSource: Send + Sync {
    /// Fetches every listed token for `chain_id`.
    ///
    /// # Errors
    /// * `UnsupportedChain` if no list is configured for the chain
    /// * `DirectoryFetch` if the list is unreachable, answers with a non-success status or
    ///   cannot be parsed
    async fn fetch(&self, chain_id: u64) -> RouterResult<Vec<Token>>;
}

/// Fetches token lists over HTTP from the per-chain URL given by [`token_list_url`]
#[derive(Debug, Clone)]
pub struct HttpTokenList {
    /// The HTTP client
    client: Client,
    /// Locations that take precedence over the published ones
    overrides: Vec<(u64, Url)>,
}

impl HttpTokenList {
    /// Create a new HTTP token-list source
    ///
    /// # Errors
    /// * If the HTTP client cannot be built
    pub fn new() -> RouterResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(RouterError::rpc)?;
        Ok(Self {
            client,
            overrides: Vec::new(),
        })
    }

    /// Fetch `chain_id`'s list from `url` instead
    #[must_use]
    pub fn with_list_url(mut self, chain_id: u64, url: Url) -> Self {
        self.overrides.retain(|(id, _)| *id != chain_id);
        self.overrides.push((chain_id, url));
        self
    }

    /// Where `chain_id`'s list is fetched from
    fn list_url(&self, chain_id: u64) -> RouterResult<Url> {
        match self.overrides.iter().find(|(id, _)| *id == chain_id) {
            Some((_, url)) => Ok(url.clone()),
            None => token_list_url(chain_id),
        }
    }
}

#[async_trait]
impl TokenListSource for HttpTokenList {
    async fn fetch(&self, chain_id: u64) -> RouterResult<Vec<Token>> {
        let url = self.list_url(chain_id)?;
        let fetch_error = |reason: String| RouterError::DirectoryFetch { chain_id, reason };

        log::info!("tokens::fetch: Fetching token list for chain {chain_id} from {url}");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("status {}", response.status())));
        }

        let list: TokenList = response
            .json()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        Ok(list
            .tokens
            .into_iter()
            .filter_map(|record| match Token::try_from(record) {
                Ok(token) => Some(token),
                Err(e) => {
                    log::warn!("tokens::fetch: Skipping token on chain {chain_id}: {e}");
                    None
                }
            })
            .collect())
    }
}

/// A fixed, in-memory token list. Lists are keyed by chain id; other chains are unsupported.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenList {
    /// Tokens per chain
    lists: Vec<(u64, Vec<Token>)>,
}

impl StaticTokenList {
    /// Create a source serving `tokens` for `chain_id`
    #[must_use]
    pub fn new(chain_id: u64, tokens: Vec<Token>) -> Self {
        Self {
            lists: vec![(chain_id, tokens)],
        }
    }
}

#[async_trait]
impl TokenListSource for StaticTokenList {
    async fn fetch(&self, chain_id: u64) -> RouterResult<Vec<Token>> {
        self.lists
            .iter()
            .find(|(id, _)| *id == chain_id)
            .map(|(_, tokens)| tokens.clone())
            .ok_or(RouterError::UnsupportedChain(chain_id))
    }
}
