//! Kuru swap bot - Main executable
//!
//! Runs random MON swaps (or consolidation back to MON) on the Kuru DEX for
//! every configured Monad testnet account, one account after another.
use anyhow::Context;
use dotenv::dotenv;
use kuru_swap_bot::monad::{checksum, TokenRegistry};
use kuru_swap_bot::{ServiceContainer, Settings};
use log::{error, info, warn};
use rand::Rng;
use std::env;
use std::sync::Arc;
use std::time::Duration;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting Kuru swap bot v{}", kuru_swap_bot::VERSION);

    // Optional explicit config file as the first argument
    let config_path = env::args().nth(1);
    let settings =
        Settings::load(config_path.as_deref()).context("Failed to load configuration")?;

    let registry = Arc::new(TokenRegistry::monad_testnet().context("Invalid token registry")?);
    let accounts = settings.load_accounts()?;
    let mode = if settings.kuru.swap_all_to_monad {
        "swap all to MON"
    } else {
        "random swaps"
    };
    info!("Running {} account(s) in {} mode", accounts.len(), mode);

    for (position, account) in accounts.iter().enumerate() {
        let container = match ServiceContainer::new(&settings, account, registry.clone()) {
            Ok(container) => container,
            Err(e) => {
                error!("[{}] Failed to initialize account: {:#}", account.index, e);
                continue;
            }
        };
        info!("[{}] Wallet {}", account.index, checksum(&container.wallet()));

        if let Err(e) = container.balance_interactor().verify_token_decimals().await {
            warn!("[{}] Could not verify token decimals: {:#}", account.index, e);
        }

        if let Err(e) = container.orchestrator().run().await {
            error!("[{}] Flow failed: {:#}", account.index, e);
        }

        if position + 1 < accounts.len() {
            let (min, max) = settings.general.random_pause_between_accounts;
            let secs = rand::rng().random_range(min..=max);
            info!("Pausing for {} seconds before the next account", secs);
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
    }

    info!("All accounts processed");
    Ok(())
}
