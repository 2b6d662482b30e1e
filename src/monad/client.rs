use crate::entity::VerifiedMarket;
use crate::kuru::abi::{IKuruPriceCalculator, IKuruRouter};
use crate::monad::abi::IERC20;
use alloy::network::Ethereum;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::eth::TransactionRequest;
use alloy::transports::http::Http;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Proxy, Url};
use std::sync::Arc;

/// Outcome of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub tx_hash: B256,
    pub success: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Every call the bot makes to the node.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64>;

    async fn native_balance(&self, owner: Address) -> Result<U256>;

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256>;

    async fn token_decimals(&self, token: Address) -> Result<u8>;

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    async fn verified_market(&self, router: Address, pool: Address) -> Result<VerifiedMarket>;

    /// Fixed-point (10^18) price over a route of pools
    async fn price_over_route(
        &self,
        calculator: Address,
        route: Vec<Address>,
        is_buy: Vec<bool>,
    ) -> Result<U256>;

    /// Nonce at the `latest` block
    async fn transaction_count(&self, owner: Address) -> Result<u64>;

    async fn gas_price(&self) -> Result<u128>;

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64>;

    async fn send_raw_transaction(&self, raw: Vec<u8>) -> Result<B256>;

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>>;
}

/// JSON-RPC backed client
pub struct RpcChainClient {
    provider: RootProvider<Ethereum>,
}

impl RpcChainClient {
    pub fn new(provider: RootProvider<Ethereum>) -> Self {
        Self { provider }
    }
}

/// Create a Monad client over HTTP, optionally routed through a proxy
pub fn create_monad_client(rpc_url: &str, proxy: Option<&str>) -> Result<Arc<RpcChainClient>> {
    let url = Url::parse(rpc_url).map_err(|e| anyhow!("Invalid RPC URL {}: {}", rpc_url, e))?;

    let provider = match proxy {
        Some(proxy) => {
            let proxy_url = if proxy.contains("://") {
                proxy.to_string()
            } else {
                format!("http://{}", proxy)
            };
            let http_client = Client::builder()
                .proxy(Proxy::all(&proxy_url).map_err(|e| anyhow!("Invalid proxy: {}", e))?)
                .build()
                .context("Failed to build HTTP client")?;

            let transport = Http::with_client(http_client, url);
            RootProvider::new(RpcClient::new(transport, false))
        }
        None => RootProvider::new_http(url),
    };

    Ok(Arc::new(RpcChainClient::new(provider)))
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .context("Failed to get chain id")
    }

    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.provider
            .get_balance(owner)
            .await
            .context("Failed to get balance")
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256> {
        IERC20::new(token, &self.provider)
            .balanceOf(owner)
            .call()
            .await
            .with_context(|| format!("Failed to get balance of token {}", token))
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        IERC20::new(token, &self.provider)
            .decimals()
            .call()
            .await
            .with_context(|| format!("Failed to get decimals of token {}", token))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        IERC20::new(token, &self.provider)
            .allowance(owner, spender)
            .call()
            .await
            .with_context(|| format!("Failed to get allowance of token {}", token))
    }

    async fn verified_market(&self, router: Address, pool: Address) -> Result<VerifiedMarket> {
        let market = IKuruRouter::new(router, &self.provider)
            .verifiedMarket(pool)
            .call()
            .await
            .with_context(|| format!("Failed to read verified market {}", pool))?;

        Ok(VerifiedMarket {
            price_precision: market.pricePrecision,
            size_precision: U256::from(market.sizePrecision),
            base_asset: market.baseAssetAddress,
            base_asset_decimals: market.baseAssetDecimals,
            quote_asset: market.quoteAssetAddress,
            quote_asset_decimals: market.quoteAssetDecimals,
            tick_size: market.tickSize,
            min_size: U256::from(market.minSize),
            max_size: U256::from(market.maxSize),
            taker_fee_bps: market.takerFeeBps,
            maker_fee_bps: market.makerFeeBps,
        })
    }

    async fn price_over_route(
        &self,
        calculator: Address,
        route: Vec<Address>,
        is_buy: Vec<bool>,
    ) -> Result<U256> {
        IKuruPriceCalculator::new(calculator, &self.provider)
            .calculatePriceOverRoute(route, is_buy)
            .call()
            .await
            .context("Failed to calculate price over route")
    }

    async fn transaction_count(&self, owner: Address) -> Result<u64> {
        self.provider
            .get_transaction_count(owner)
            .latest()
            .await
            .context("Failed to get transaction count")
    }

    async fn gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .context("Failed to get gas price")
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64> {
        self.provider
            .estimate_gas(tx)
            .await
            .context("Failed to estimate gas")
    }

    async fn send_raw_transaction(&self, raw: Vec<u8>) -> Result<B256> {
        let pending = self
            .provider
            .send_raw_transaction(&raw)
            .await
            .context("Failed to send transaction")?;

        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .with_context(|| format!("Failed to get receipt for {}", hash))?;

        Ok(receipt.map(|receipt| ReceiptSummary {
            tx_hash: receipt.transaction_hash,
            success: receipt.status(),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        }))
    }
}
