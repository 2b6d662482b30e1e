use crate::entity::{BotError, SwapRequest};
use crate::kuru::abi::IKuruRouter;
use crate::kuru::config::Config;
use crate::kuru::market_service::MarketService;
use crate::kuru::models::SwapQuote;
use crate::monad::client::{ChainClient, ReceiptSummary};
use crate::monad::tokens::{ensure_allowance, unwrap_native, TokenRegistry, TransactionSender};
use crate::monad::utils::to_base_units_floor;
use alloy::primitives::Address;
use alloy::sol_types::SolCall;
use anyhow::Result;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

/// A confirmed swap together with the quote it was built from
#[derive(Debug, Clone)]
pub struct SwapExecution {
    pub quote: SwapQuote,
    pub receipt: ReceiptSummary,
}

/// Service for performing swaps through the Kuru router
pub struct SwapService {
    client: Arc<dyn ChainClient>,
    sender: Arc<TransactionSender>,
    market_service: Arc<dyn MarketService>,
    registry: Arc<TokenRegistry>,
    config: Config,
}

impl SwapService {
    pub fn new(
        client: Arc<dyn ChainClient>,
        sender: Arc<TransactionSender>,
        market_service: Arc<dyn MarketService>,
        registry: Arc<TokenRegistry>,
        config: Config,
    ) -> Self {
        Self {
            client,
            sender,
            market_service,
            registry,
            config,
        }
    }

    pub fn address(&self) -> Address {
        self.sender.address()
    }

    pub fn native_symbol(&self) -> String {
        self.registry.native().symbol.clone()
    }

    /// Quote, approve if needed, then sign and send one router swap.
    pub async fn execute_swap(&self, request: &SwapRequest) -> Result<SwapExecution> {
        let source = self.registry.get(&request.source_token)?;
        let target = self.registry.get(&request.target_token)?;

        let market = self.market_service.get_market_info(source, target).await?;
        let quote = SwapQuote::new(&market, source, target, request.amount, request.slippage)?;
        debug!(
            "Quote {} {} -> {}: price={}, expected={}, min_out={} (is_buy={})",
            quote.amount_in,
            source.symbol,
            target.symbol,
            quote.price,
            quote.expected_out,
            quote.min_amount_out,
            quote.is_buy
        );

        if !source.is_native() {
            ensure_allowance(
                self.client.as_ref(),
                &self.sender,
                source,
                self.config.router,
                quote.amount_in_units,
            )
            .await?;
        }

        let calldata = IKuruRouter::anyToAnySwapCall {
            marketAddresses: vec![quote.pool_address],
            isBuy: vec![quote.is_buy],
            nativeSend: vec![quote.native_send],
            debitToken: source.address,
            creditToken: target.address,
            amount: quote.amount_in_units,
            minAmountOut: quote.min_amount_out_units,
        }
        .abi_encode();

        info!(
            "Swapping {} {} to {} (expected {}, min {})",
            quote.amount_in, source.symbol, target.symbol, quote.expected_out, quote.min_amount_out
        );
        let receipt = self
            .sender
            .send(self.config.router, calldata, quote.value())
            .await?;

        Ok(SwapExecution { quote, receipt })
    }

    /// Unwrap wrapped MON back to the native asset
    pub async fn unwrap_native(&self, symbol: &str, amount: Decimal) -> Result<ReceiptSummary> {
        let token = self.registry.get(symbol)?;
        if !token.is_wrapped_native() {
            return Err(BotError::UnsupportedPair {
                from: token.symbol.clone(),
                to: self.registry.native().symbol.clone(),
            }
            .into());
        }

        let units = to_base_units_floor(amount, token.decimals)?;
        info!("Unwrapping {} {}", amount, token.symbol);
        unwrap_native(&self.sender, token, units).await
    }
}
