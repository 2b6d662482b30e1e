use crate::entity::{Account, BotError};
use crate::kuru::Config as KuruConfig;
use crate::monad::tokens::constants::{DEFAULT_EXPLORER_URL, DEFAULT_RPC_URL};
use crate::utils::{read_lines, RetryPolicy};
use anyhow::Result;
use config::{Config, ConfigBuilder, Environment, File};
use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::path::Path;

pub const ENV_PREFIX: &str = "KURU_BOT";
pub const DEFAULT_CONFIG_FILE: &str = "config";
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

// Backoff of the swap retry loop, seconds
pub const RETRY_BACKOFF_SECS: (u64, u64) = (5, 10);

// Keys holding `min,max` pairs when given through the environment
const RANGE_KEYS: [&str; 5] = [
    "settings.pause_between_attempts",
    "settings.random_pause_between_actions",
    "settings.random_pause_between_accounts",
    "flow.number_of_swaps",
    "flow.percent_of_balance_to_swap",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcSettings {
    pub url: String,
    pub explorer_url: String,
    /// Skip the `eth_chainId` lookup when set
    pub chain_id: Option<u64>,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            chain_id: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Attempts per swap
    pub attempts: u32,
    /// Pause after a failed swap, seconds
    pub pause_between_attempts: (u64, u64),
    /// Pause after a successful swap, seconds
    pub random_pause_between_actions: (u64, u64),
    pub random_pause_between_accounts: (u64, u64),
    pub private_keys_path: String,
    pub proxies_path: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            attempts: 5,
            pause_between_attempts: (10, 20),
            random_pause_between_actions: (30, 60),
            random_pause_between_accounts: (60, 120),
            private_keys_path: "data/private_keys.txt".to_string(),
            proxies_path: "data/proxies.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    pub number_of_swaps: (u32, u32),
    /// Share of the MON balance spent per swap, percent
    pub percent_of_balance_to_swap: (Decimal, Decimal),
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            number_of_swaps: (1, 3),
            percent_of_balance_to_swap: (Decimal::TEN, Decimal::from(15)),
        }
    }
}

/// Bot configuration: optional config file, then `KURU_BOT__SECTION__KEY` variables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rpc: RpcSettings,
    #[serde(rename = "settings")]
    pub general: GeneralSettings,
    pub flow: FlowSettings,
    pub kuru: KuruConfig,
}

impl Settings {
    /// Load `path` (or `config.*`) if present and apply environment overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut environment = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",");
        for key in RANGE_KEYS {
            environment = environment.with_list_parse_key(key);
        }

        let builder = Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_FILE)).required(path.is_some()))
            .add_source(environment);

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings: Settings = builder
            .build()
            .map_err(BotError::from)?
            .try_deserialize()
            .map_err(BotError::from)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let general = &self.general;
        if general.attempts < 1 {
            return Err(config_error("settings.attempts must be at least 1"));
        }
        check_range("settings.pause_between_attempts", general.pause_between_attempts)?;
        check_range(
            "settings.random_pause_between_actions",
            general.random_pause_between_actions,
        )?;
        check_range(
            "settings.random_pause_between_accounts",
            general.random_pause_between_accounts,
        )?;
        check_range("flow.number_of_swaps", self.flow.number_of_swaps)?;

        let (min, max) = self.flow.percent_of_balance_to_swap;
        check_range("flow.percent_of_balance_to_swap", (min, max))?;
        if min <= Decimal::ZERO || max > Decimal::ONE_HUNDRED {
            return Err(config_error(
                "flow.percent_of_balance_to_swap must be within (0, 100]",
            ));
        }

        let slippage = self.kuru.slippage;
        if slippage.is_sign_negative() || slippage >= Decimal::ONE_HUNDRED {
            return Err(config_error("kuru.slippage must be within [0, 100)"));
        }
        if self.kuru.thresholds.values().any(|t| t.is_sign_negative()) {
            return Err(config_error("kuru.thresholds must not be negative"));
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.general.attempts,
            backoff_secs: RETRY_BACKOFF_SECS,
        }
    }

    /// Accounts from the keys file, or the `PRIVATE_KEY` variable when there is none
    pub fn load_accounts(&self) -> Result<Vec<Account>> {
        let keys_path = Path::new(&self.general.private_keys_path);
        let keys = if keys_path.exists() {
            read_lines(keys_path)?
        } else {
            env::var(PRIVATE_KEY_ENV)
                .map(|key| vec![key.trim().to_string()])
                .unwrap_or_default()
        };
        if keys.iter().all(|key| key.is_empty()) {
            return Err(config_error(&format!(
                "no private keys in {} or {}",
                keys_path.display(),
                PRIVATE_KEY_ENV
            )));
        }

        let proxies_path = Path::new(&self.general.proxies_path);
        let proxies = if proxies_path.exists() {
            read_lines(proxies_path)?
        } else {
            Vec::new()
        };
        info!("Loaded {} accounts and {} proxies", keys.len(), proxies.len());

        Ok(assign_proxies(keys, &proxies))
    }
}

/// Pair every key with a proxy, reusing proxies when there are fewer of them
pub fn assign_proxies(keys: Vec<String>, proxies: &[String]) -> Vec<Account> {
    keys.into_iter()
        .enumerate()
        .map(|(i, private_key)| Account {
            index: i + 1,
            private_key,
            proxy: if proxies.is_empty() {
                None
            } else {
                Some(proxies[i % proxies.len()].clone())
            },
        })
        .collect()
}

fn check_range<T: PartialOrd>(name: &str, (min, max): (T, T)) -> Result<()> {
    if min > max {
        return Err(config_error(&format!("{}: min is greater than max", name)));
    }
    Ok(())
}

fn config_error(message: &str) -> anyhow::Error {
    BotError::Config(message.to_string()).into()
}
