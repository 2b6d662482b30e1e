//! In-memory `ChainClient` for unit tests.

use crate::entity::VerifiedMarket;
use crate::monad::client::{ChainClient, ReceiptSummary};
use alloy::primitives::{Address, B256, U256};
use alloy::rpc::types::eth::TransactionRequest;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockChain {
    pub native_balances: Mutex<HashMap<Address, U256>>,
    pub token_balances: Mutex<HashMap<(Address, Address), U256>>,
    pub decimals: HashMap<Address, u8>,
    pub allowances: Mutex<HashMap<(Address, Address, Address), U256>>,
    pub markets: HashMap<Address, VerifiedMarket>,
    pub prices: HashMap<(Address, bool), U256>,
    /// Receipt status per broadcast in order, `true` once exhausted
    pub receipt_statuses: Mutex<VecDeque<bool>>,
    /// Broadcasts that are accepted but never mined
    pub dropped_broadcasts: Mutex<u32>,
    /// Transport failures to raise before the next estimates succeed
    pub estimate_failures: Mutex<u32>,
    pub estimates: Mutex<Vec<TransactionRequest>>,
    pub price_queries: Mutex<Vec<(Vec<Address>, Vec<bool>)>>,
    receipts: Mutex<HashMap<B256, bool>>,
    sent: Mutex<u64>,
}

impl MockChain {
    pub fn with_native_balance(self, owner: Address, wei: U256) -> Self {
        self.native_balances.lock().unwrap().insert(owner, wei);
        self
    }

    pub fn with_token_balance(self, token: Address, owner: Address, raw: U256) -> Self {
        self.token_balances.lock().unwrap().insert((token, owner), raw);
        self
    }

    pub fn with_market(mut self, pool: Address, market: VerifiedMarket) -> Self {
        self.markets.insert(pool, market);
        self
    }

    pub fn with_prices(mut self, pool: Address, base_to_quote: U256, quote_to_base: U256) -> Self {
        self.prices.insert((pool, true), base_to_quote);
        self.prices.insert((pool, false), quote_to_base);
        self
    }

    pub fn with_receipt_statuses(self, statuses: &[bool]) -> Self {
        self.receipt_statuses
            .lock()
            .unwrap()
            .extend(statuses.iter().copied());
        self
    }

    pub fn with_dropped_broadcasts(self, count: u32) -> Self {
        *self.dropped_broadcasts.lock().unwrap() = count;
        self
    }

    /// Calls that went through gas estimation, i.e. every transaction built
    pub fn calls(&self) -> Vec<TransactionRequest> {
        self.estimates.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> u64 {
        *self.sent.lock().unwrap()
    }
}

pub fn market(base_asset: Address, quote_asset: Address) -> VerifiedMarket {
    VerifiedMarket {
        price_precision: 1000,
        size_precision: U256::from(100_000u64),
        base_asset,
        base_asset_decimals: U256::from(18u8),
        quote_asset,
        quote_asset_decimals: U256::from(6u8),
        tick_size: 1,
        min_size: U256::from(1u8),
        max_size: U256::from(u64::MAX),
        taker_fee_bps: U256::from(30u8),
        maker_fee_bps: U256::from(10u8),
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn chain_id(&self) -> Result<u64> {
        Ok(10143)
    }

    async fn native_balance(&self, owner: Address) -> Result<U256> {
        Ok(self
            .native_balances
            .lock()
            .unwrap()
            .get(&owner)
            .copied()
            .unwrap_or_default())
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256> {
        Ok(self
            .token_balances
            .lock()
            .unwrap()
            .get(&(token, owner))
            .copied()
            .unwrap_or_default())
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        self.decimals
            .get(&token)
            .copied()
            .ok_or_else(|| anyhow!("execution reverted"))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        Ok(self
            .allowances
            .lock()
            .unwrap()
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default())
    }

    async fn verified_market(&self, _router: Address, pool: Address) -> Result<VerifiedMarket> {
        self.markets
            .get(&pool)
            .cloned()
            .ok_or_else(|| anyhow!("execution reverted"))
    }

    async fn price_over_route(
        &self,
        _calculator: Address,
        route: Vec<Address>,
        is_buy: Vec<bool>,
    ) -> Result<U256> {
        self.price_queries
            .lock()
            .unwrap()
            .push((route.clone(), is_buy.clone()));
        self.prices
            .get(&(route[0], is_buy[0]))
            .copied()
            .ok_or_else(|| anyhow!("execution reverted"))
    }

    async fn transaction_count(&self, _owner: Address) -> Result<u64> {
        Ok(*self.sent.lock().unwrap())
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(50_000_000_000)
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64> {
        {
            let mut failures = self.estimate_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(anyhow!("connection reset by peer"));
            }
        }
        self.estimates.lock().unwrap().push(tx);
        Ok(150_000)
    }

    async fn send_raw_transaction(&self, _raw: Vec<u8>) -> Result<B256> {
        let mut sent = self.sent.lock().unwrap();
        *sent += 1;
        let hash = B256::left_padding_from(&sent.to_be_bytes());

        {
            let mut dropped = self.dropped_broadcasts.lock().unwrap();
            if *dropped > 0 {
                *dropped -= 1;
                return Ok(hash);
            }
        }
        let status = self
            .receipt_statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(true);
        self.receipts.lock().unwrap().insert(hash, status);
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>> {
        Ok(self
            .receipts
            .lock()
            .unwrap()
            .get(&hash)
            .map(|success| ReceiptSummary {
                tx_hash: hash,
                success: *success,
                block_number: Some(1),
                gas_used: 120_000,
            }))
    }
}
