use std::time::Duration;

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use async_trait::async_trait;

use super::contracts::{IPlunderFactory, IPlunderPair, IPlunderRouter, IERC20};
use super::{ChainReader, ChainWriter};
use crate::error::{RouterError, RouterResult};
use crate::execute::{SwapMode, SwapOrder};
use crate::scan::Reserves;

/// [`ChainReader`] and [`ChainWriter`] over an alloy provider.
///
/// Writes need a provider built with a wallet filler and `owner` set to that wallet's address.
#[derive(Debug, Clone)]
pub struct RpcChain<P> {
    /// The provider
    provider: P,
    /// Signing address, if the provider carries a wallet
    owner: Option<Address>,
    /// Delay between receipt polls
    poll_interval: Duration,
}

impl<P: Provider> RpcChain<P> {
    /// Wrap a read-only provider
    #[must_use]
    pub const fn read_only(provider: P, poll_interval: Duration) -> Self {
        Self {
            provider,
            owner: None,
            poll_interval,
        }
    }

    /// Wrap a provider that signs as `owner`
    #[must_use]
    pub const fn with_signer(provider: P, owner: Address, poll_interval: Duration) -> Self {
        Self {
            provider,
            owner: Some(owner),
            poll_interval,
        }
    }
}

#[async_trait]
impl<P: Provider> ChainReader for RpcChain<P> {
    async fn chain_id(&self) -> RouterResult<u64> {
        self.provider.get_chain_id().await.map_err(RouterError::rpc)
    }

    async fn all_pairs_length(&self, factory: Address) -> RouterResult<u64> {
        let length = IPlunderFactory::new(factory, &self.provider)
            .allPairsLength()
            .call()
            .await
            .map_err(RouterError::rpc)?
            ._0;
        u64::try_from(length)
            .map_err(|_| RouterError::Rpc(format!("pair count {length} out of range")))
    }

    async fn pair_at(&self, factory: Address, index: u64) -> RouterResult<Address> {
        Ok(IPlunderFactory::new(factory, &self.provider)
            .allPairs(U256::from(index))
            .call()
            .await
            .map_err(RouterError::rpc)?
            ._0)
    }

    async fn pair_tokens(&self, pair: Address) -> RouterResult<(Address, Address)> {
        let contract = IPlunderPair::new(pair, &self.provider);
        let token0 = contract.token0().call().await.map_err(RouterError::rpc)?._0;
        let token1 = contract.token1().call().await.map_err(RouterError::rpc)?._0;
        Ok((token0, token1))
    }

    async fn reserves(&self, pair: Address) -> RouterResult<Reserves> {
        Ok(IPlunderPair::new(pair, &self.provider)
            .getReserves()
            .call()
            .await
            .map_err(RouterError::rpc)?
            .into())
    }

    async fn amounts_out(
        &self,
        router: Address,
        amount_in: U256,
        path: &[Address],
    ) -> RouterResult<Vec<U256>> {
        Ok(IPlunderRouter::new(router, &self.provider)
            .getAmountsOut(amount_in, path.to_vec())
            .call()
            .await
            .map_err(RouterError::rpc)?
            ._0)
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> RouterResult<U256> {
        Ok(IERC20::new(token, &self.provider)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(RouterError::rpc)?
            ._0)
    }
}

#[async_trait]
impl<P: Provider> ChainWriter for RpcChain<P> {
    fn owner(&self) -> RouterResult<Address> {
        self.owner.ok_or(RouterError::MissingSigner)
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> RouterResult<TxHash> {
        let owner = self.owner()?;
        let pending = IERC20::new(token, &self.provider)
            .approve(spender, amount)
            .from(owner)
            .send()
            .await
            .map_err(RouterError::rpc)?;
        Ok(*pending.tx_hash())
    }

    async fn submit_swap(&self, router: Address, order: &SwapOrder) -> RouterResult<TxHash> {
        let owner = self.owner()?;
        let router = IPlunderRouter::new(router, &self.provider);
        let path = order.path.clone();
        let deadline = U256::from(order.deadline);

        let pending = match order.mode {
            SwapMode::ExactInput => {
                router
                    .swapExactTokensForTokens(
                        order.amount_in,
                        order.amount_out,
                        path,
                        order.recipient,
                        deadline,
                    )
                    .from(owner)
                    .send()
                    .await
            }
            SwapMode::ExactOutput => {
                router
                    .swapTokensForExactTokens(
                        order.amount_out,
                        order.amount_in,
                        path,
                        order.recipient,
                        deadline,
                    )
                    .from(owner)
                    .send()
                    .await
            }
        }
        .map_err(RouterError::rpc)?;

        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> RouterResult<()> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(RouterError::rpc)?;

            match receipt {
                Some(receipt) if receipt.status() => return Ok(()),
                Some(_) => return Err(RouterError::TransactionReverted { tx_hash }),
                None => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }
}
