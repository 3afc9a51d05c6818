//! Connection setup for the configured RPC endpoint.
//!
//! A wallet filler is attached only when `PLUNDER_PRIVATE_KEY` is set; without it the context
//! can list tokens and quote, and any write fails with `MissingSigner`.

use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use eyre::{Result, WrapErr};
use url::Url;

use crate::chain::RpcChain;
use crate::config::Config;
use crate::service::SwapService;
use crate::tokens::{HttpTokenList, TokenDirectory};

/// Chain handle the application runs against
pub type AppChain = RpcChain<DynProvider>;

/// Service wired to the live chain and HTTP token lists
pub type AppService = SwapService<AppChain, HttpTokenList>;

/// Application context holding the configuration and the chain connection
pub struct AppContext {
    /// Loaded configuration
    pub config: Config,
    /// Connection to the configured endpoint
    pub chain: AppChain,
}

impl AppContext {
    /// Connects to `config.rpc_url`, signing with `config.private_key` if present.
    ///
    /// # Errors
    /// * If the RPC URL or the private key cannot be parsed
    pub fn new(config: Config) -> Result<Self> {
        let url = Url::parse(&config.rpc_url)
            .wrap_err_with(|| format!("invalid PLUNDER_RPC_URL {}", config.rpc_url))?;
        let poll_interval = config.receipt_poll_interval;

        let chain = match &config.private_key {
            Some(key) => {
                let signer: PrivateKeySigner = key
                    .trim()
                    .parse()
                    .wrap_err("invalid PLUNDER_PRIVATE_KEY")?;
                let owner = signer.address();
                log::info!("app_context::new: Signing as {owner}");
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .on_http(url)
                    .erased();
                RpcChain::with_signer(provider, owner, poll_interval)
            }
            None => {
                log::info!("app_context::new: No private key set, running read-only");
                let provider = ProviderBuilder::new().on_http(url).erased();
                RpcChain::read_only(provider, poll_interval)
            }
        };

        Ok(Self { config, chain })
    }

    /// Loads the configuration from the environment and connects.
    ///
    /// # Errors
    /// * As for [`Self::new`]
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env())
    }

    /// Builds the swap service over this context's chain with HTTP token lists.
    ///
    /// # Errors
    /// * If the HTTP client cannot be built
    pub fn into_service(self) -> Result<AppService> {
        let directory = TokenDirectory::new(HttpTokenList::new()?);
        Ok(SwapService::new(self.chain, directory, self.config))
    }
}
