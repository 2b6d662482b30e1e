use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pool metadata as returned by the router's `verifiedMarket` lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedMarket {
    pub price_precision: u32,
    pub size_precision: U256,
    pub base_asset: Address,
    pub base_asset_decimals: U256,
    pub quote_asset: Address,
    pub quote_asset_decimals: U256,
    pub tick_size: u32,
    pub min_size: U256,
    pub max_size: U256,
    pub taker_fee_bps: U256,
    pub maker_fee_bps: U256,
}

/// Snapshot of a pool and its prices in both directions.
///
/// Fetched for every swap attempt, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub pool_address: Address,
    pub base_asset: Address,
    pub quote_asset: Address,
    pub price_base_to_quote: Decimal,
    pub price_quote_to_base: Decimal,
}
