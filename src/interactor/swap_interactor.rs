use crate::entity::{SwapRequest, SwapResult};
use crate::kuru::SwapService;
use crate::utils::{format_amount, retry_with_backoff, tx_link, RetryPolicy};
use async_trait::async_trait;
use log::{error, info};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Swap boundary: every failure comes back as an unsuccessful `SwapResult`.
#[async_trait]
pub trait SwapInteractor: Send + Sync {
    async fn execute_swap(&self, request: SwapRequest) -> SwapResult;

    async fn unwrap_native(&self, symbol: &str, amount: Decimal) -> SwapResult;
}

pub struct SwapInteractorImpl {
    swap_service: Arc<SwapService>,
    retry: RetryPolicy,
    explorer_url: String,
    account_index: usize,
}

impl SwapInteractorImpl {
    pub fn new(
        swap_service: Arc<SwapService>,
        retry: RetryPolicy,
        explorer_url: String,
        account_index: usize,
    ) -> Self {
        Self {
            swap_service,
            retry,
            explorer_url,
            account_index,
        }
    }
}

#[async_trait]
impl SwapInteractor for SwapInteractorImpl {
    async fn execute_swap(&self, request: SwapRequest) -> SwapResult {
        let label = format!(
            "[{}] Swap {} {} -> {}",
            self.account_index,
            format_amount(request.amount),
            request.source_token,
            request.target_token
        );
        let service = &self.swap_service;
        let req = &request;

        match retry_with_backoff(&label, self.retry, |_| service.execute_swap(req)).await {
            Ok(execution) => {
                let hash = execution.receipt.tx_hash;
                info!(
                    "[{}] Swapped {} {} for ~{} {}: {}",
                    self.account_index,
                    format_amount(execution.quote.amount_in),
                    request.source_token,
                    format_amount(execution.quote.expected_out),
                    request.target_token,
                    tx_link(&self.explorer_url, &hash)
                );
                SwapResult::succeeded(
                    &request.source_token,
                    &request.target_token,
                    execution.quote.amount_in,
                    execution.quote.expected_out,
                    hash.to_string(),
                )
            }
            Err(e) => {
                error!("{} failed: {:#}", label, e);
                SwapResult::failed(
                    &request.source_token,
                    &request.target_token,
                    request.amount,
                    format!("{:#}", e),
                )
            }
        }
    }

    async fn unwrap_native(&self, symbol: &str, amount: Decimal) -> SwapResult {
        let native = self.swap_service.native_symbol();
        let label = format!(
            "[{}] Unwrap {} {}",
            self.account_index,
            format_amount(amount),
            symbol
        );
        let service = &self.swap_service;

        match retry_with_backoff(&label, self.retry, |_| service.unwrap_native(symbol, amount)).await
        {
            Ok(receipt) => {
                info!(
                    "[{}] Unwrapped {} {}: {}",
                    self.account_index,
                    format_amount(amount),
                    symbol,
                    tx_link(&self.explorer_url, &receipt.tx_hash)
                );
                SwapResult::succeeded(symbol, &native, amount, amount, receipt.tx_hash.to_string())
            }
            Err(e) => {
                error!("{} failed: {:#}", label, e);
                SwapResult::failed(symbol, &native, amount, format!("{:#}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Token;
    use crate::kuru::{Config, KuruMarketService};
    use crate::monad::mock::{market, MockChain};
    use crate::monad::tokens::{TokenRegistry, TransactionSender};
    use crate::monad::wallet::signer_from_hex;
    use alloy::primitives::{address, Address, U256};
    use std::collections::HashMap;
    use tokio::time::{Duration, Instant};

    const USDC: Address = address!("f817257fed379853cde0fa4f97ab987181b1e5ea");
    const DAK: Address = address!("0f0bdebf0f83cd1ee3974779bcb7315f9808c714");
    const POOL: Address = address!("d3af145f1aa1a471b5f0f62c52cf8fcdc9ab55d3");

    fn interactor(chain: Arc<MockChain>, attempts: u32) -> SwapInteractorImpl {
        let registry = Arc::new(
            TokenRegistry::new(
                vec![
                    Token::native("MON", 18),
                    Token::erc20("USDC", USDC, 6),
                    Token::erc20("DAK", DAK, 18),
                ],
                HashMap::from([("USDC".to_string(), POOL)]),
            )
            .unwrap(),
        );
        let signer = signer_from_hex(
            "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        )
        .unwrap();
        let sender = Arc::new(TransactionSender::new(chain.clone(), signer));
        let market_service = Arc::new(KuruMarketService::new(
            chain.clone(),
            registry.clone(),
            Config::default(),
        ));
        let service = Arc::new(SwapService::new(
            chain,
            sender,
            market_service,
            registry,
            Config::default(),
        ));
        SwapInteractorImpl::new(
            service,
            RetryPolicy {
                attempts,
                backoff_secs: (5, 10),
            },
            "https://testnet.monadexplorer.com/tx/".to_string(),
            1,
        )
    }

    fn chain() -> MockChain {
        let e18 = U256::from(10u64).pow(U256::from(18u64));
        MockChain::default()
            .with_market(POOL, market(Address::ZERO, USDC))
            .with_prices(POOL, U256::from(2u8) * e18, e18 / U256::from(2u8))
    }

    fn request() -> SwapRequest {
        SwapRequest::new("MON", "USDC", Decimal::TEN)
    }

    #[tokio::test(start_paused = true)]
    async fn reverted_swap_is_retried() {
        let chain = Arc::new(chain().with_receipt_statuses(&[false, true]));

        let result = interactor(chain.clone(), 3).execute_swap(request()).await;

        assert!(result.success);
        assert_eq!(result.amount_out, Decimal::from(20));
        assert_eq!(chain.sent_count(), 2);
        assert_eq!(
            result.tx_hash,
            Some(alloy::primitives::B256::left_padding_from(&2u64.to_be_bytes()).to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn receipt_timeout_is_retried_with_a_new_broadcast() {
        let chain = Arc::new(chain().with_dropped_broadcasts(1));
        let started = Instant::now();

        let result = interactor(chain.clone(), 3).execute_swap(request()).await;

        assert!(result.success);
        assert_eq!(chain.sent_count(), 2);
        assert_eq!(
            result.tx_hash,
            Some(alloy::primitives::B256::left_padding_from(&2u64.to_be_bytes()).to_string())
        );
        // full receipt wait plus one backoff
        assert!(started.elapsed() >= Duration::from_secs(125));
    }

    #[tokio::test(start_paused = true)]
    async fn transport_errors_are_retried() {
        let chain = chain();
        *chain.estimate_failures.lock().unwrap() = 1;
        let chain = Arc::new(chain);

        let result = interactor(chain.clone(), 2).execute_swap(request()).await;

        assert!(result.success);
        assert_eq!(chain.sent_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_attempts_return_failure() {
        let chain = Arc::new(chain().with_receipt_statuses(&[false, false, false]));

        let result = interactor(chain.clone(), 3).execute_swap(request()).await;

        assert!(!result.success);
        assert!(result.tx_hash.is_none());
        assert!(result.error_message.unwrap().contains("reverted"));
        assert_eq!(result.amount_in, Decimal::TEN);
        assert_eq!(chain.sent_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_pool_is_not_retried() {
        let chain = Arc::new(chain());
        let started = Instant::now();

        let result = interactor(chain.clone(), 3)
            .execute_swap(SwapRequest::new("MON", "DAK", Decimal::ONE))
            .await;

        assert!(!result.success);
        assert!(result.error_message.unwrap().contains("not found"));
        assert_eq!(chain.sent_count(), 0);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn non_native_pairs_fail_without_sending() {
        let chain = Arc::new(chain());

        let result = interactor(chain.clone(), 3)
            .execute_swap(SwapRequest::new("USDC", "DAK", Decimal::ONE))
            .await;

        assert!(!result.success);
        assert_eq!(chain.sent_count(), 0);
    }
}
