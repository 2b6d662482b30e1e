use crate::entity::DEFAULT_SLIPPAGE_PERCENT;
use crate::monad::tokens::constants::{
    CONSOLIDATE_THRESHOLDS, DEFAULT_CONSOLIDATE_THRESHOLD, KURU_PRICE_CALCULATOR, KURU_ROUTER,
};
use alloy::primitives::Address;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Kuru section of the bot configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Router handling swaps and market lookups
    pub router: Address,

    /// Contract pricing routes of markets
    pub price_calculator: Address,

    /// Sell everything back to MON instead of random swaps
    pub swap_all_to_monad: bool,

    /// Slippage tolerance in percent
    pub slippage: Decimal,

    /// Per-symbol overrides of the consolidation thresholds
    pub thresholds: HashMap<String, Decimal>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            router: KURU_ROUTER,
            price_calculator: KURU_PRICE_CALCULATOR,
            swap_all_to_monad: false,
            slippage: DEFAULT_SLIPPAGE_PERCENT,
            thresholds: HashMap::new(),
        }
    }
}

impl Config {
    /// Balance a token must exceed before it is consolidated into MON
    pub fn threshold_for(&self, symbol: &str) -> Decimal {
        if let Some((_, threshold)) = self
            .thresholds
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(symbol))
        {
            return *threshold;
        }

        let raw = CONSOLIDATE_THRESHOLDS
            .iter()
            .find(|(known, _)| *known == symbol)
            .map(|(_, threshold)| *threshold)
            .unwrap_or(DEFAULT_CONSOLIDATE_THRESHOLD);

        Decimal::from_str(raw).unwrap_or(Decimal::ZERO)
    }
}
