//! # Trade Executor
//!
//! Turns a priced route into on-chain transactions: an approval when the router's allowance
//! falls short, then the router swap, each awaited to its receipt.

/// Approval and swap submission
pub mod executor;

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

pub use executor::TradeExecutor;

/// Which side of the swap is fixed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapMode {
    /// Exact input, minimum output
    #[default]
    ExactInput,
    /// Exact output, maximum input
    ExactOutput,
}

/// A fully specified router call.
///
/// For [`SwapMode::ExactInput`] `amount_in` is exact and `amount_out` is the minimum accepted.
/// For [`SwapMode::ExactOutput`] `amount_out` is exact and `amount_in` is the maximum paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOrder {
    /// Which amount is fixed
    pub mode: SwapMode,
    /// Input amount, exact or maximum
    pub amount_in: U256,
    /// Output amount, minimum or exact
    pub amount_out: U256,
    /// Ordered token addresses, source first
    pub path: Vec<Address>,
    /// Receiver of the output tokens
    pub recipient: Address,
    /// Unix time after which the router reverts
    pub deadline: u64,
}

impl SwapOrder {
    /// Token paid into the first pool
    #[must_use]
    pub fn token_in(&self) -> Option<Address> {
        self.path.first().copied()
    }
}
