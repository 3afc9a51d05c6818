//! Runtime configuration loaded from the environment (and `.env` via dotenv).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::Address;
use url::Url;

use crate::error::{RouterError, RouterResult};
use crate::route::PricingConvention;
use crate::utils::constants::{
    MAINNET_FACTORY, MAINNET_ROUTER, MAINNET_TOKEN_LIST, TESTNET_FACTORY, TESTNET_ROUTER,
    TESTNET_TOKEN_LIST,
};

/// Zilliqa EVM mainnet
pub const ZILLIQA_MAINNET: u64 = 32769;
/// Zilliqa EVM testnet
pub const ZILLIQA_TESTNET: u64 = 33101;

const DEFAULT_RPC_URL: &str = "https://api.zilliqa.com";
const DEFAULT_DEADLINE_SECS: u64 = 1200;
const DEFAULT_RECEIPT_POLL_MS: u64 = 1000;
const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Hex private key of the trading wallet, if any
    pub private_key: Option<String>,
    /// Relative deadline applied when the caller does not give an absolute one
    pub deadline_secs: u64,
    /// Slippage below the router's expected output an executed quote accepts, in basis points
    pub slippage_bps: u16,
    /// How often to ask the node for a pending transaction's receipt
    pub receipt_poll_interval: Duration,
    /// Reserve-consumption convention used by the pricing engine
    pub pricing: PricingConvention,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            private_key: None,
            deadline_secs: DEFAULT_DEADLINE_SECS,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            receipt_poll_interval: Duration::from_millis(DEFAULT_RECEIPT_POLL_MS),
            pricing: PricingConvention::default(),
        }
    }
}

impl Config {
    /// Reads the configuration from `PLUNDER_*` environment variables, loading `.env` first.
    ///
    /// # Environment Variables
    /// * `PLUNDER_RPC_URL` - JSON-RPC endpoint
    /// * `PLUNDER_PRIVATE_KEY` - Signing key, only needed for writes
    /// * `PLUNDER_DEADLINE_SECS` - Relative deadline for executed quotes
    /// * `PLUNDER_SLIPPAGE_BPS` - Default slippage for executed quotes
    /// * `PLUNDER_RECEIPT_POLL_MS` - Receipt poll interval
    /// * `PLUNDER_PRICING` - `spot` or `constant-product`
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let pricing = match env::var("PLUNDER_PRICING") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                log::warn!("config::from_env: {e}, using {}", defaults.pricing);
                defaults.pricing
            }),
            Err(_) => defaults.pricing,
        };

        Self {
            rpc_url: env::var("PLUNDER_RPC_URL").unwrap_or(defaults.rpc_url),
            private_key: env::var("PLUNDER_PRIVATE_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            deadline_secs: env_number("PLUNDER_DEADLINE_SECS").unwrap_or(defaults.deadline_secs),
            slippage_bps: env_number("PLUNDER_SLIPPAGE_BPS").unwrap_or(defaults.slippage_bps),
            receipt_poll_interval: env_number("PLUNDER_RECEIPT_POLL_MS")
                .map_or(defaults.receipt_poll_interval, Duration::from_millis),
            pricing,
        }
    }
}

fn env_number<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

/// Contract addresses for one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainContracts {
    /// Pair factory
    pub factory: Address,
    /// Swap router, also the spender for approvals
    pub router: Address,
}

impl ChainContracts {
    /// Looks up the deployment for `chain_id`.
    ///
    /// # Errors
    /// * `UnsupportedChain` if the chain has no known deployment
    pub fn for_chain(chain_id: u64) -> RouterResult<Self> {
        match chain_id {
            ZILLIQA_MAINNET => Ok(Self {
                factory: MAINNET_FACTORY,
                router: MAINNET_ROUTER,
            }),
            ZILLIQA_TESTNET => Ok(Self {
                factory: TESTNET_FACTORY,
                router: TESTNET_ROUTER,
            }),
            _ => Err(RouterError::UnsupportedChain(chain_id)),
        }
    }
}

/// Where the token list for `chain_id` is published.
///
/// # Environment Variables
/// * `PLUNDER_TOKEN_LIST_<CHAINID>` - Overrides the published location
///
/// # Errors
/// * `UnsupportedChain` if the chain has no known list
/// * `DirectoryFetch` if the override is not a valid URL
pub fn token_list_url(chain_id: u64) -> RouterResult<Url> {
    let list = match chain_id {
        ZILLIQA_MAINNET => MAINNET_TOKEN_LIST,
        ZILLIQA_TESTNET => TESTNET_TOKEN_LIST,
        _ => return Err(RouterError::UnsupportedChain(chain_id)),
    };

    let list =
        env::var(format!("PLUNDER_TOKEN_LIST_{chain_id}")).unwrap_or_else(|_| list.to_string());
    Url::parse(&list).map_err(|e| RouterError::DirectoryFetch {
        chain_id,
        reason: format!("token list url {list}: {e}"),
    })
}
