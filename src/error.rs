//! Error taxonomy for the swap router.
//!
//! Every failure is terminal for the call that produced it. Nothing in the core retries;
//! a caller that wants another attempt reissues the whole operation, which re-reads reserves.

use alloy::primitives::TxHash;
use thiserror::Error;

/// Errors produced by quoting, routing and trade execution
#[derive(Error, Debug)]
pub enum RouterError {
    /// The chain id has no configured contracts or token-list source
    #[error("unsupported chain {0}")]
    UnsupportedChain(u64),

    /// The token list could not be fetched or parsed
    #[error("failed to fetch tokens for chain {chain_id}: {reason}")]
    DirectoryFetch {
        /// Chain the directory was requested for
        chain_id: u64,
        /// Transport, status or parse failure
        reason: String,
    },

    /// A symbol is absent from the chain's directory
    #[error("unknown token {symbol} on chain {chain_id}")]
    UnknownToken {
        /// The symbol that was looked up
        symbol: String,
        /// Chain the lookup was made against
        chain_id: u64,
    },

    /// The request itself is malformed (identical tokens, unknown operation, bad parameters)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No direct or single-intermediate path has enough liquidity
    #[error("no feasible path connects the two tokens with sufficient liquidity")]
    NoRoute,

    /// The route handed to the executor is too short or repeats a token
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// A human-unit amount could not be converted to the token's smallest unit
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An approval or swap was mined but reverted
    #[error("transaction {tx_hash} reverted")]
    TransactionReverted {
        /// Hash of the reverted transaction
        tx_hash: TxHash,
    },

    /// A remote read or submission failed before producing a result
    #[error("rpc error: {0}")]
    Rpc(String),

    /// A write was requested on a chain handle without a signer
    #[error("no signer configured; set PLUNDER_PRIVATE_KEY")]
    MissingSigner,

    /// Operation input or output did not match its schema
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl RouterError {
    /// Wraps any displayable transport or contract failure as an [`RouterError::Rpc`]
    pub fn rpc(err: impl std::fmt::Display) -> Self {
        Self::Rpc(err.to_string())
    }
}

/// Result alias used throughout the core
pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(RouterError::UnsupportedChain(7).to_string(), "unsupported chain 7");
        assert_eq!(
            RouterError::UnknownToken {
                symbol: "ZIL".to_string(),
                chain_id: 33101
            }
            .to_string(),
            "unknown token ZIL on chain 33101"
        );
        assert_eq!(
            RouterError::NoRoute.to_string(),
            "no feasible path connects the two tokens with sufficient liquidity"
        );
    }
}
