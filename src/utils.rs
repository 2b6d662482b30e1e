use crate::entity::is_retryable;
use crate::monad::wallet::checksum;
use alloy::primitives::{Address, B256};
use anyhow::{Context, Result};
use log::warn;
use rand::Rng;
use rust_decimal::Decimal;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

/// Bounded retry with a random pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_secs: (u64, u64),
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_secs: (5, 10),
        }
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error or runs out of attempts.
///
/// `op` receives the 1-based attempt number. The last error is returned as is.
pub async fn retry_with_backoff<F, Fut, T>(label: &str, policy: RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if !is_retryable(&e) => {
                warn!("{} failed: {:#}", label, e);
                return Err(e);
            }
            Err(e) if attempt < attempts => {
                let (min, max) = policy.backoff_secs;
                let pause = rand::rng().random_range(min..=max.max(min));
                warn!(
                    "{} failed (attempt {}/{}): {:#}, retrying in {}s",
                    label, attempt, attempts, e, pause
                );
                sleep(Duration::from_secs(pause)).await;
                attempt += 1;
            }
            Err(e) => {
                warn!("{} failed (attempt {}/{}): {:#}", label, attempt, attempts, e);
                return Err(e);
            }
        }
    }
}

/// Non-empty lines of a text file, `#` comments skipped
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

// Shorten an address for logs
pub fn shorten_address(address: &Address) -> String {
    let full = checksum(address);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

// Format amount with up to 6 decimals
pub fn format_amount(amount: Decimal) -> String {
    amount.round_dp(6).normalize().to_string()
}

pub fn tx_link(explorer_url: &str, tx_hash: &B256) -> String {
    if explorer_url.ends_with('/') {
        format!("{}{}", explorer_url, tx_hash)
    } else {
        format!("{}/{}", explorer_url, tx_hash)
    }
}
