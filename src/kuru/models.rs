use crate::entity::{BotError, MarketInfo, Token};
use crate::monad::utils::{apply_slippage, to_base_units, to_base_units_floor};
use alloy::primitives::{Address, U256};
use anyhow::Result;
use rust_decimal::Decimal;

/// Amounts of a single router swap, computed from a fresh market snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    pub pool_address: Address,
    pub is_buy: bool,      // Source is the market's quote asset
    pub native_send: bool, // Source is paid as call value
    pub price: Decimal,
    pub amount_in: Decimal,
    pub amount_in_units: U256,
    pub expected_out: Decimal,
    pub min_amount_out: Decimal,
    pub min_amount_out_units: U256,
}

impl SwapQuote {
    pub fn new(
        market: &MarketInfo,
        source: &Token,
        target: &Token,
        amount: Decimal,
        slippage: Decimal,
    ) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(BotError::InvalidAmount.into());
        }

        let is_buy = source.address == market.quote_asset;
        let price = if is_buy {
            market.price_quote_to_base
        } else {
            market.price_base_to_quote
        };

        let expected_out = amount
            .checked_mul(price)
            .ok_or_else(|| BotError::AmountOverflow(format!("{} * {}", amount, price)))?;
        let min_amount_out = apply_slippage(expected_out, slippage)?;

        Ok(Self {
            pool_address: market.pool_address,
            is_buy,
            native_send: source.is_native(),
            price,
            amount_in: amount,
            amount_in_units: to_base_units(amount, source.decimals)?,
            expected_out,
            min_amount_out,
            min_amount_out_units: to_base_units_floor(min_amount_out, target.decimals)?,
        })
    }

    /// Call value of the swap transaction
    pub fn value(&self) -> U256 {
        if self.native_send {
            self.amount_in_units
        } else {
            U256::ZERO
        }
    }
}
