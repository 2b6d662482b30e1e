use crate::entity::{SwapRequest, SwapResult, Token, TokenBalance};
use crate::interactor::balance_interactor::BalanceInteractor;
use crate::interactor::swap_interactor::SwapInteractor;
use crate::kuru::Config as KuruConfig;
use crate::monad::tokens::TokenRegistry;
use crate::settings::{FlowSettings, GeneralSettings, Settings};
use crate::utils::{format_amount, shorten_address};
use alloy::primitives::Address;
use anyhow::Result;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

// Native balance below this is not worth swapping
pub const MIN_NATIVE_BALANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
// Swaps of this size or less are skipped
pub const MIN_SWAP_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
// Pause between tokens while consolidating, seconds
pub const CONSOLIDATE_PAUSE_SECS: (u64, u64) = (2, 5);

/// A randomly chosen swap out of the native balance
#[derive(Debug, Clone, PartialEq)]
pub struct PairSelection {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
    pub percent: Decimal,
}

/// Drives one account through random swaps or consolidation to MON.
pub struct SwapOrchestrator {
    account_index: usize,
    wallet: Address,
    registry: Arc<TokenRegistry>,
    balances: Arc<dyn BalanceInteractor>,
    swaps: Arc<dyn SwapInteractor>,
    general: GeneralSettings,
    flow: FlowSettings,
    kuru: KuruConfig,
    rng: StdRng,
}

impl SwapOrchestrator {
    pub fn new(
        account_index: usize,
        wallet: Address,
        registry: Arc<TokenRegistry>,
        balances: Arc<dyn BalanceInteractor>,
        swaps: Arc<dyn SwapInteractor>,
        settings: &Settings,
    ) -> Self {
        Self {
            account_index,
            wallet,
            registry,
            balances,
            swaps,
            general: settings.general.clone(),
            flow: settings.flow.clone(),
            kuru: settings.kuru.clone(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a seeded generator for pair, amount and pause draws
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Run the configured mode and return the result of every swap tried
    pub async fn run(&mut self) -> Result<Vec<SwapResult>> {
        info!(
            "[{}] Starting Kuru flow for {}",
            self.account_index,
            shorten_address(&self.wallet)
        );

        if self.kuru.swap_all_to_monad {
            self.swap_all_to_native().await
        } else {
            self.run_random_swaps().await
        }
    }

    pub async fn run_random_swaps(&mut self) -> Result<Vec<SwapResult>> {
        let balances = self.balances.get_wallet_balances(self.wallet).await?;
        self.log_balances(&balances);

        let (min, max) = self.flow.number_of_swaps;
        let count = self.rng.random_range(min..=max);
        info!("[{}] Will perform {} swaps", self.account_index, count);

        let mut results = Vec::new();
        for n in 1..=count {
            info!("[{}] Executing swap {}/{}", self.account_index, n, count);

            let balances = match self.balances.get_wallet_balances(self.wallet).await {
                Ok(balances) => balances,
                Err(e) => {
                    warn!(
                        "[{}] Failed to refresh balances, skipping swap {}: {:#}",
                        self.account_index, n, e
                    );
                    continue;
                }
            };

            let Some(selection) = self.select_random_token_pair(&balances) else {
                warn!(
                    "[{}] No suitable tokens found for swap {}. Skipping.",
                    self.account_index, n
                );
                continue;
            };

            if selection.amount <= MIN_SWAP_AMOUNT {
                warn!(
                    "[{}] Amount {} {} too small for swap {}. Skipping.",
                    self.account_index,
                    format_amount(selection.amount),
                    selection.from,
                    n
                );
                continue;
            }

            let request = SwapRequest::new(&selection.from, &selection.to, selection.amount)
                .with_slippage(self.kuru.slippage);
            let result = self.swaps.execute_swap(request).await;

            let pause_range = if result.success {
                info!(
                    "[{}] Swap {} completed: {} {} -> {} {}",
                    self.account_index,
                    n,
                    format_amount(result.amount_in),
                    result.source_token,
                    format_amount(result.amount_out),
                    result.target_token
                );
                self.general.random_pause_between_actions
            } else {
                error!(
                    "[{}] Swap {} failed: {}",
                    self.account_index,
                    n,
                    result.error_message.as_deref().unwrap_or("unknown error")
                );
                self.general.pause_between_attempts
            };
            results.push(result);

            if n < count {
                self.pause(pause_range).await;
            }
        }

        info!(
            "[{}] Completed {}/{} swaps",
            self.account_index,
            results.iter().filter(|result| result.success).count(),
            count
        );
        Ok(results)
    }

    /// Sell every token holding above its threshold back to MON
    pub async fn swap_all_to_native(&mut self) -> Result<Vec<SwapResult>> {
        let native = self.registry.native().clone();
        let tokens: Vec<Token> = self.registry.non_native().cloned().collect();
        let mut results = Vec::new();

        for token in tokens {
            let balance = match self.balances.get_token_balance(self.wallet, &token).await {
                Ok(balance) => balance,
                Err(e) => {
                    warn!(
                        "[{}] Failed to read {} balance: {:#}",
                        self.account_index, token.symbol, e
                    );
                    continue;
                }
            };

            let threshold = self.kuru.threshold_for(&token.symbol);
            if balance <= threshold {
                info!(
                    "[{}] {} balance {} is at or below {}, skipping",
                    self.account_index, token.symbol, balance, threshold
                );
                continue;
            }

            self.log_pair_balance(&token, &native, "before").await;

            let result = if token.is_wrapped_native() {
                self.swaps.unwrap_native(&token.symbol, balance).await
            } else {
                let request = SwapRequest::new(&token.symbol, &native.symbol, balance)
                    .with_slippage(self.kuru.slippage);
                self.swaps.execute_swap(request).await
            };

            if result.success {
                info!(
                    "[{}] Swapped {} {} to {}",
                    self.account_index,
                    format_amount(balance),
                    token.symbol,
                    native.symbol
                );
            } else {
                error!(
                    "[{}] Failed to swap {} to {}: {}",
                    self.account_index,
                    token.symbol,
                    native.symbol,
                    result.error_message.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);

            self.log_pair_balance(&token, &native, "after").await;
            self.pause(CONSOLIDATE_PAUSE_SECS).await;
        }

        info!(
            "[{}] All tokens have been swapped to {}",
            self.account_index, native.symbol
        );
        Ok(results)
    }

    /// Source is always the native token, the destination any swap target
    pub fn select_random_token_pair(&mut self, balances: &[TokenBalance]) -> Option<PairSelection> {
        let registry = Arc::clone(&self.registry);
        let native = registry.native();
        let native_balance = balances
            .iter()
            .find(|balance| balance.symbol == native.symbol)
            .map(|balance| balance.amount)
            .unwrap_or(Decimal::ZERO);

        if native_balance < MIN_NATIVE_BALANCE {
            warn!(
                "[{}] {} balance {} is too small to swap",
                self.account_index, native.symbol, native_balance
            );
            return None;
        }

        let targets = registry.swap_targets();
        let target = targets.choose(&mut self.rng)?;

        let percent = self.draw_percent();
        let amount = native_balance * percent / Decimal::ONE_HUNDRED;
        info!(
            "[{}] Selected {} {} -> {} ({}% of balance)",
            self.account_index,
            format_amount(amount),
            native.symbol,
            target.symbol,
            percent
        );

        Some(PairSelection {
            from: native.symbol.clone(),
            to: target.symbol.clone(),
            amount,
            percent,
        })
    }

    // Uniform in the configured range, at 0.01% steps
    fn draw_percent(&mut self) -> Decimal {
        let (min, max) = self.flow.percent_of_balance_to_swap;
        let to_steps = |value: Decimal| {
            (value * Decimal::ONE_HUNDRED)
                .round()
                .to_i64()
                .unwrap_or(0)
        };
        let (low, high) = (to_steps(min), to_steps(max));
        Decimal::new(self.rng.random_range(low..=high.max(low)), 2)
    }

    async fn pause(&mut self, (min, max): (u64, u64)) {
        let secs = self.rng.random_range(min..=max.max(min));
        info!("[{}] Pausing for {} seconds", self.account_index, secs);
        sleep(Duration::from_secs(secs)).await;
    }

    fn log_balances(&self, balances: &[TokenBalance]) {
        for balance in balances {
            info!(
                "[{}] {}: {}",
                self.account_index,
                balance.symbol,
                format_amount(balance.amount)
            );
        }
    }

    async fn log_pair_balance(&self, token: &Token, native: &Token, stage: &str) {
        for token in [token, native] {
            match self.balances.get_token_balance(self.wallet, token).await {
                Ok(amount) => info!(
                    "[{}] Balance {} {} swap: {}",
                    self.account_index, token.symbol, stage, amount
                ),
                Err(e) => warn!(
                    "[{}] Failed to read {} balance {} swap: {:#}",
                    self.account_index, token.symbol, stage, e
                ),
            }
        }
    }
}
