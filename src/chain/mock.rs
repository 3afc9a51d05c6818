#![allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::missing_docs_in_private_items)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use super::{ChainReader, ChainWriter};
use crate::error::{RouterError, RouterResult};
use crate::execute::{SwapMode, SwapOrder};
use crate::models::token::Token;
use crate::scan::Reserves;

/// A transaction the mock accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockTx {
    /// `approve` on a token
    Approve {
        /// Token approved
        token: Address,
        /// Spender approved
        spender: Address,
        /// Allowance set
        amount: U256,
    },
    /// Router call
    Swap {
        /// Router called
        router: Address,
        /// Order submitted
        order: SwapOrder,
    },
}

#[derive(Debug, Clone)]
struct MockPool {
    address: Address,
    token0: Address,
    token1: Address,
    reserves: Reserves,
}

/// In-memory chain with one pair registry, a signer and ERC-20 allowances
#[derive(Debug, Default)]
pub struct MockChain {
    chain_id: u64,
    pools: Vec<MockPool>,
    owner: Option<Address>,
    allowances: Mutex<HashMap<(Address, Address, Address), U256>>,
    transactions: Mutex<Vec<MockTx>>,
    revert_swaps: bool,
    fail_reads_at: Option<u64>,
    reads: AtomicUsize,
}

impl MockChain {
    /// Address of the mock's factory
    pub const FACTORY: Address = Address::repeat_byte(0xfa);
    /// Address of the mock's signer
    pub const OWNER: Address = Address::repeat_byte(0x0e);

    /// Empty mainnet chain with a signer
    pub fn new() -> Self {
        Self {
            chain_id: crate::config::ZILLIQA_MAINNET,
            owner: Some(Self::OWNER),
            ..Default::default()
        }
    }

    /// Adds a pool listing `token0` then `token1`
    pub fn with_pool(mut self, token0: &Token, token1: &Token, reserve0: u64, reserve1: u64) -> Self {
        let address = self.pool_address(self.pools.len());
        self.pools.push(MockPool {
            address,
            token0: token0.address,
            token1: token1.address,
            reserves: Reserves::new(U256::from(reserve0), U256::from(reserve1)),
        });
        self
    }

    /// Answers as a different chain
    pub const fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Drops the signer
    pub const fn read_only(mut self) -> Self {
        self.owner = None;
        self
    }

    /// Sets an allowance from the signer
    pub fn with_allowance(self, token: Address, spender: Address, amount: U256) -> Self {
        self.allowances
            .lock()
            .unwrap()
            .insert((token, Self::OWNER, spender), amount);
        self
    }

    /// Swap receipts report failure
    pub const fn reverting_swaps(mut self) -> Self {
        self.revert_swaps = true;
        self
    }

    /// Pair reads fail from `index` onward
    pub const fn failing_at(mut self, index: u64) -> Self {
        self.fail_reads_at = Some(index);
        self
    }

    /// The factory every pool is registered with
    pub const fn factory(&self) -> Address {
        Self::FACTORY
    }

    /// Address of the pool at `index`
    pub fn pool_address(&self, index: usize) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = 0xaa;
        bytes[12..].copy_from_slice(&(index as u64).to_be_bytes());
        Address::from(bytes)
    }

    /// Transactions accepted so far
    pub fn transactions(&self) -> Vec<MockTx> {
        self.transactions.lock().unwrap().clone()
    }

    /// Number of reads answered so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Current allowance from the signer
    pub fn allowance_of(&self, token: Address, spender: Address) -> U256 {
        self.allowances
            .lock()
            .unwrap()
            .get(&(token, Self::OWNER, spender))
            .copied()
            .unwrap_or_default()
    }

    fn pool(&self, pair: Address) -> RouterResult<&MockPool> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.pools
            .iter()
            .find(|pool| pool.address == pair)
            .ok_or_else(|| RouterError::Rpc(format!("no contract at {pair}")))
    }

    /// What a fee-charging router pays along `path`, or `None` if a hop has no pool
    pub fn payout_along(&self, amount_in: U256, path: &[Address]) -> Option<Vec<U256>> {
        let mut amounts = vec![amount_in];
        for hop in path.windows(2) {
            let (token_in, token_out) = (hop[0], hop[1]);
            let (reserve_in, reserve_out) = self.pools.iter().find_map(|pool| {
                let Reserves { reserve0, reserve1 } = pool.reserves;
                if (pool.token0, pool.token1) == (token_in, token_out) {
                    Some((reserve0, reserve1))
                } else if (pool.token1, pool.token0) == (token_in, token_out) {
                    Some((reserve1, reserve0))
                } else {
                    None
                }
            })?;
            let with_fee = amounts.last().copied()? * U256::from(997);
            amounts.push(with_fee * reserve_out / (reserve_in * U256::from(1000) + with_fee));
        }
        Some(amounts)
    }

    fn record(&self, tx: MockTx) -> TxHash {
        let mut transactions = self.transactions.lock().unwrap();
        transactions.push(tx);
        TxHash::with_last_byte(u8::try_from(transactions.len()).unwrap())
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn chain_id(&self) -> RouterResult<u64> {
        Ok(self.chain_id)
    }

    // answers for any factory address
    async fn all_pairs_length(&self, _factory: Address) -> RouterResult<u64> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.pools.len() as u64)
    }

    async fn pair_at(&self, _factory: Address, index: u64) -> RouterResult<Address> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads_at.is_some_and(|fail_at| index >= fail_at) {
            return Err(RouterError::Rpc("connection reset".to_string()));
        }
        self.pools
            .get(usize::try_from(index).unwrap())
            .map(|pool| pool.address)
            .ok_or_else(|| RouterError::Rpc(format!("pair index {index} out of range")))
    }

    async fn pair_tokens(&self, pair: Address) -> RouterResult<(Address, Address)> {
        let pool = self.pool(pair)?;
        Ok((pool.token0, pool.token1))
    }

    async fn reserves(&self, pair: Address) -> RouterResult<Reserves> {
        Ok(self.pool(pair)?.reserves)
    }

    async fn amounts_out(
        &self,
        _router: Address,
        amount_in: U256,
        path: &[Address],
    ) -> RouterResult<Vec<U256>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.payout_along(amount_in, path)
            .ok_or_else(|| RouterError::Rpc("execution reverted: INVALID_PATH".to_string()))
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> RouterResult<U256> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .allowances
            .lock()
            .unwrap()
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ChainWriter for MockChain {
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
        self.allowances
            .lock()
            .unwrap()
            .insert((token, owner, spender), amount);
        Ok(self.record(MockTx::Approve {
            token,
            spender,
            amount,
        }))
    }

    async fn submit_swap(&self, router: Address, order: &SwapOrder) -> RouterResult<TxHash> {
        let owner = self.owner()?;
        // gas estimation fails when the pools pay less than the minimum
        if order.mode == SwapMode::ExactInput {
            let payout = self
                .payout_along(order.amount_in, &order.path)
                .and_then(|amounts| amounts.last().copied());
            if payout.is_some_and(|payout| payout < order.amount_out) {
                return Err(RouterError::Rpc(
                    "execution reverted: INSUFFICIENT_OUTPUT_AMOUNT".to_string(),
                ));
            }
        }
        let token_in = order.path.first().copied().unwrap_or_default();
        {
            let mut allowances = self.allowances.lock().unwrap();
            let allowance = allowances.entry((token_in, owner, router)).or_default();
            if !self.revert_swaps {
                *allowance = allowance.saturating_sub(order.amount_in);
            }
        }
        Ok(self.record(MockTx::Swap {
            router,
            order: order.clone(),
        }))
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> RouterResult<()> {
        let transactions = self.transactions.lock().unwrap();
        let index = usize::from(tx_hash.0[31]).checked_sub(1);
        match index.and_then(|index| transactions.get(index)) {
            Some(MockTx::Swap { .. }) if self.revert_swaps => {
                Err(RouterError::TransactionReverted { tx_hash })
            }
            Some(_) => Ok(()),
            None => Err(RouterError::Rpc(format!("unknown transaction {tx_hash}"))),
        }
    }
}
