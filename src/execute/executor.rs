use alloy::primitives::{Address, TxHash, U256};

use super::SwapOrder;
use crate::chain::{ChainReader, ChainWriter};
use crate::error::{RouterError, RouterResult};
use crate::route::validate_path;

/// Submits approvals and swaps through a signing chain handle
#[derive(Debug)]
pub struct TradeExecutor<'a, C: ?Sized> {
    /// Chain the transactions go to
    chain: &'a C,
}

impl<'a, C: ChainReader + ChainWriter + ?Sized> TradeExecutor<'a, C> {
    /// Create a new executor
    #[must_use]
    pub const fn new(chain: &'a C) -> Self {
        Self { chain }
    }

    /// Makes sure `spender` may move at least `required` of `token` for the signer.
    ///
    /// Approves exactly `required` when the current allowance is short and waits for the
    /// receipt.
    ///
    /// # Arguments
    ///
    /// * `token` - The token to be spent
    /// * `spender` - The contract that will move it
    /// * `required` - The allowance needed
    ///
    /// # Returns
    ///
    /// The approval's hash, or `None` when nothing had to be sent
    ///
    /// # Errors
    /// * `MissingSigner` without a signer
    /// * `TransactionReverted` if the approval fails on chain
    /// * `Rpc` on transport failure
    pub async fn ensure_approval(
        &self,
        token: Address,
        spender: Address,
        required: U256,
    ) -> RouterResult<Option<TxHash>> {
        let owner = self.chain.owner()?;
        let allowance = self.chain.allowance(token, owner, spender).await?;
        if allowance >= required {
            log::debug!(
                "execute::ensure_approval: Allowance {allowance} of {token} covers {required}"
            );
            return Ok(None);
        }

        let tx_hash = self.chain.approve(token, spender, required).await?;
        log::info!("execute::ensure_approval: Approving {required} of {token} for {spender}: {tx_hash}");
        self.chain.wait_for_receipt(tx_hash).await?;
        Ok(Some(tx_hash))
    }

    /// Executes `order` through `router`.
    ///
    /// The path is checked before anything is sent. The router is approved for the order's
    /// input bound, then the swap is submitted and awaited.
    ///
    /// # Arguments
    ///
    /// * `router` - The router to call, also the approval spender
    /// * `order` - Path, bounds, recipient, deadline and which side is exact
    ///
    /// # Returns
    ///
    /// The approval hash, if one was needed, followed by the swap hash
    ///
    /// # Errors
    /// * `InvalidRoute` if the path is shorter than two tokens or repeats one
    /// * `TransactionReverted` carrying the failing transaction's hash
    /// * `MissingSigner` or `Rpc` as for [`Self::ensure_approval`]
    pub async fn execute_swap(
        &self,
        router: Address,
        order: &SwapOrder,
    ) -> RouterResult<Vec<TxHash>> {
        validate_path(&order.path)?;
        let token_in = order
            .token_in()
            .ok_or_else(|| RouterError::InvalidRoute("empty token path".to_string()))?;

        let mut tx_hashes = Vec::with_capacity(2);
        if let Some(approval) = self
            .ensure_approval(token_in, router, order.amount_in)
            .await?
        {
            tx_hashes.push(approval);
        }

        let swap = self.chain.submit_swap(router, order).await?;
        log::info!(
            "execute::execute_swap: Submitted {:?} swap {} -> {} over {} tokens: {swap}",
            order.mode,
            order.amount_in,
            order.amount_out,
            order.path.len()
        );
        self.chain.wait_for_receipt(swap).await?;
        tx_hashes.push(swap);

        Ok(tx_hashes)
    }
}
