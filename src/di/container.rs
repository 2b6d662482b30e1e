use std::sync::Arc;

use alloy::primitives::Address;
use anyhow::Result;

use crate::entity::Account;
use crate::interactor::balance_interactor::{BalanceInteractor, BalanceInteractorImpl};
use crate::interactor::swap_interactor::{SwapInteractor, SwapInteractorImpl};
use crate::kuru::{KuruMarketService, MarketService, SwapService};
use crate::monad::{create_monad_client, signer_from_hex, ChainClient, TokenRegistry, TransactionSender};
use crate::services::SwapOrchestrator;
use crate::settings::Settings;

/// ServiceContainer wires the services of one account
pub struct ServiceContainer {
    account_index: usize,
    wallet: Address,
    settings: Settings,
    registry: Arc<TokenRegistry>,

    // Interactors
    balance_interactor: Arc<dyn BalanceInteractor>,
    swap_interactor: Arc<dyn SwapInteractor>,
}

impl ServiceContainer {
    /// Connect to the configured RPC, through the account's proxy if it has one
    pub fn new(settings: &Settings, account: &Account, registry: Arc<TokenRegistry>) -> Result<Self> {
        let client = create_monad_client(&settings.rpc.url, account.proxy.as_deref())?;
        Self::with_client(settings, account, registry, client)
    }

    pub fn with_client(
        settings: &Settings,
        account: &Account,
        registry: Arc<TokenRegistry>,
        chain_client: Arc<dyn ChainClient>,
    ) -> Result<Self> {
        let signer = signer_from_hex(&account.private_key)?;
        let wallet = signer.address();

        let mut sender = TransactionSender::new(chain_client.clone(), signer);
        if let Some(chain_id) = settings.rpc.chain_id {
            sender = sender.with_chain_id(chain_id);
        }
        let sender = Arc::new(sender);

        let market_service = Arc::new(KuruMarketService::new(
            chain_client.clone(),
            registry.clone(),
            settings.kuru.clone(),
        )) as Arc<dyn MarketService>;

        let swap_service = Arc::new(SwapService::new(
            chain_client.clone(),
            sender,
            market_service,
            registry.clone(),
            settings.kuru.clone(),
        ));

        let balance_interactor =
            Arc::new(BalanceInteractorImpl::new(chain_client.clone(), registry.clone()))
                as Arc<dyn BalanceInteractor>;

        let swap_interactor = Arc::new(SwapInteractorImpl::new(
            swap_service,
            settings.retry_policy(),
            settings.rpc.explorer_url.clone(),
            account.index,
        )) as Arc<dyn SwapInteractor>;

        Ok(Self {
            account_index: account.index,
            wallet,
            settings: settings.clone(),
            registry,
            balance_interactor,
            swap_interactor,
        })
    }

    pub fn wallet(&self) -> Address {
        self.wallet
    }

    pub fn balance_interactor(&self) -> Arc<dyn BalanceInteractor> {
        self.balance_interactor.clone()
    }

    pub fn orchestrator(&self) -> SwapOrchestrator {
        SwapOrchestrator::new(
            self.account_index,
            self.wallet,
            self.registry.clone(),
            self.balance_interactor.clone(),
            self.swap_interactor.clone(),
            &self.settings,
        )
    }
}
