use crate::entity::{BotError, MarketInfo, Token};
use crate::kuru::config::Config;
use crate::monad::client::ChainClient;
use crate::monad::tokens::TokenRegistry;
use crate::monad::utils::price_from_fixed_point;
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Source of pool metadata and prices
#[async_trait]
pub trait MarketService: Send + Sync {
    /// Resolve the native-asset market of a pair with current prices
    async fn get_market_info(&self, from: &Token, to: &Token) -> Result<MarketInfo>;
}

/// Market lookups through the Kuru router and price calculator
pub struct KuruMarketService {
    client: Arc<dyn ChainClient>,
    registry: Arc<TokenRegistry>,
    config: Config,
}

impl KuruMarketService {
    pub fn new(client: Arc<dyn ChainClient>, registry: Arc<TokenRegistry>, config: Config) -> Self {
        Self {
            client,
            registry,
            config,
        }
    }
}

#[async_trait]
impl MarketService for KuruMarketService {
    async fn get_market_info(&self, from: &Token, to: &Token) -> Result<MarketInfo> {
        let pool = self.registry.pool_for_pair(from, to)?;

        let market = self
            .client
            .verified_market(self.config.router, pool)
            .await?;
        debug!("Verified market {}: {:?}", pool, market);

        // Exactly one side is native, the other must be traded by this pool
        let traded = if from.is_native() { to } else { from };
        if market.base_asset != traded.address && market.quote_asset != traded.address {
            return Err(BotError::MarketMismatch {
                pool: pool.to_string(),
                token: traded.symbol.clone(),
            }
            .into());
        }

        let base_to_quote = self
            .client
            .price_over_route(self.config.price_calculator, vec![pool], vec![true])
            .await?;
        let quote_to_base = self
            .client
            .price_over_route(self.config.price_calculator, vec![pool], vec![false])
            .await?;

        let info = MarketInfo {
            pool_address: pool,
            base_asset: market.base_asset,
            quote_asset: market.quote_asset,
            price_base_to_quote: price_from_fixed_point(base_to_quote)?,
            price_quote_to_base: price_from_fixed_point(quote_to_base)?,
        };
        debug!(
            "Market {} prices: base->quote={}, quote->base={}",
            pool, info.price_base_to_quote, info.price_quote_to_base
        );

        Ok(info)
    }
}
