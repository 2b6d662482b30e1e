use crate::entity::{Token, TokenBalance};
use crate::monad::client::ChainClient;
use crate::monad::tokens::{get_native_balance, get_token_balance, TokenRegistry};
use alloy::primitives::Address;
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

#[async_trait]
pub trait BalanceInteractor: Send + Sync {
    async fn get_token_balance(&self, wallet: Address, token: &Token) -> Result<Decimal>;

    /// Balances of every registered token, native first
    async fn get_wallet_balances(&self, wallet: Address) -> Result<Vec<TokenBalance>>;

    /// Compare registry decimals with the token contracts
    async fn verify_token_decimals(&self) -> Result<()>;
}

pub struct BalanceInteractorImpl {
    client: Arc<dyn ChainClient>,
    registry: Arc<TokenRegistry>,
}

impl BalanceInteractorImpl {
    pub fn new(client: Arc<dyn ChainClient>, registry: Arc<TokenRegistry>) -> Self {
        Self { client, registry }
    }
}

#[async_trait]
impl BalanceInteractor for BalanceInteractorImpl {
    async fn get_token_balance(&self, wallet: Address, token: &Token) -> Result<Decimal> {
        if token.is_native() {
            get_native_balance(self.client.as_ref(), wallet).await
        } else {
            get_token_balance(self.client.as_ref(), token, wallet).await
        }
    }

    async fn get_wallet_balances(&self, wallet: Address) -> Result<Vec<TokenBalance>> {
        let native = self.registry.native();
        let mut balances = Vec::with_capacity(self.registry.tokens().len());

        for token in std::iter::once(native).chain(self.registry.non_native()) {
            let amount = self.get_token_balance(wallet, token).await?;
            debug!("{} balance: {}", token.symbol, amount);
            balances.push(TokenBalance {
                symbol: token.symbol.clone(),
                amount,
                token_address: token.address,
            });
        }

        Ok(balances)
    }

    async fn verify_token_decimals(&self) -> Result<()> {
        for token in self.registry.non_native() {
            let on_chain = self.client.token_decimals(token.address).await?;
            if on_chain != token.decimals {
                warn!(
                    "{} has {} decimals on chain, registry says {}",
                    token.symbol, on_chain, token.decimals
                );
            }
        }
        Ok(())
    }
}
