//! # Chain access
//!
//! The core only needs to read contract state and to submit transactions and await their
//! receipts. Both capabilities are traits so the scanner and executor can run against the
//! alloy-backed [`RpcChain`] or an in-memory chain in tests.

/// Solidity bindings
pub mod contracts;
/// In-memory chain for tests
#[cfg(test)]
pub mod mock;
/// alloy provider implementation
pub mod rpc;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::error::RouterResult;
use crate::execute::SwapOrder;
use crate::scan::Reserves;

pub use rpc::RpcChain;

/// Contract reads
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Chain identifier the reads are answered from
    async fn chain_id(&self) -> RouterResult<u64>;

    /// Number of pairs registered with `factory`
    async fn all_pairs_length(&self, factory: Address) -> RouterResult<u64>;

    /// Address of the pair at `index` in `factory`'s registry
    async fn pair_at(&self, factory: Address, index: u64) -> RouterResult<Address>;

    /// `(token0, token1)` of a pair
    async fn pair_tokens(&self, pair: Address) -> RouterResult<(Address, Address)>;

    /// Current reserves of a pair
    async fn reserves(&self, pair: Address) -> RouterResult<Reserves>;

    /// What `router` pays at each step of `path` for `amount_in`, fee included.
    ///
    /// The first element is `amount_in`, the last the final output.
    async fn amounts_out(
        &self,
        router: Address,
        amount_in: U256,
        path: &[Address],
    ) -> RouterResult<Vec<U256>>;

    /// How much of `token` `spender` may move on behalf of `owner`
    async fn allowance(&self, token: Address, owner: Address, spender: Address)
        -> RouterResult<U256>;
}

/// Transaction submission
#[async_trait]
pub trait ChainWriter: Send + Sync {
    /// Address transactions are signed by
    ///
    /// # Errors
    /// * `MissingSigner` if the handle cannot sign
    fn owner(&self) -> RouterResult<Address>;

    /// Submits `approve(spender, amount)` on `token`
    async fn approve(&self, token: Address, spender: Address, amount: U256)
        -> RouterResult<TxHash>;

    /// Submits the router call described by `order`
    async fn submit_swap(&self, router: Address, order: &SwapOrder) -> RouterResult<TxHash>;

    /// Blocks until `tx_hash` has a receipt.
    ///
    /// # Errors
    /// * `TransactionReverted` if the receipt reports failure
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> RouterResult<()>;
}
