use crate::entity::BotError;
use crate::monad::tokens::constants::{NATIVE_DECIMALS, PRICE_DECIMALS};
use alloy::primitives::U256;
use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

// Extra gas on top of the node's estimate
pub const GAS_LIMIT_MARGIN_PERCENT: u64 = 30;

const MAX_DECIMAL_SCALE: u32 = 28;

/// 10^decimals as a `Decimal`
pub fn pow10(decimals: u8) -> Result<Decimal> {
    let exp = decimals as u32;
    if exp > MAX_DECIMAL_SCALE {
        return Err(BotError::AmountOverflow(format!("10^{}", decimals)).into());
    }
    Ok(Decimal::from_i128_with_scale(10i128.pow(exp), 0))
}

fn scale_up(amount: Decimal, decimals: u8) -> Result<Decimal> {
    if amount.is_sign_negative() {
        return Err(BotError::InvalidAmount.into());
    }
    amount
        .checked_mul(pow10(decimals)?)
        .ok_or_else(|| BotError::AmountOverflow(amount.to_string()).into())
}

fn units_to_u256(units: Decimal) -> Result<U256> {
    units
        .to_u128()
        .map(U256::from)
        .ok_or_else(|| BotError::AmountOverflow(units.to_string()).into())
}

/// Convert a human amount to base units, rounding half away from zero
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<U256> {
    let scaled = scale_up(amount, decimals)?;
    units_to_u256(scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Convert a human amount to base units, dropping any fraction of a unit
pub fn to_base_units_floor(amount: Decimal, decimals: u8) -> Result<U256> {
    let scaled = scale_up(amount, decimals)?;
    units_to_u256(scaled.trunc())
}

/// Convert base units to a human amount.
///
/// Values beyond the 96-bit `Decimal` mantissa lose their lowest digits.
pub fn from_base_units(raw: U256, decimals: u8) -> Result<Decimal> {
    let ten = U256::from(10u8);
    let mut raw = raw;
    let mut scale = decimals as u32;

    while scale > MAX_DECIMAL_SCALE {
        raw /= ten;
        scale -= 1;
    }

    loop {
        if let Ok(mantissa) = i128::try_from(raw) {
            if let Ok(value) = Decimal::try_from_i128_with_scale(mantissa, scale) {
                return Ok(value.normalize());
            }
        }
        if scale == 0 {
            return Err(BotError::AmountOverflow(raw.to_string()).into());
        }
        raw /= ten;
        scale -= 1;
    }
}

/// Convert wei to MON
pub fn wei_to_native(wei: U256) -> Result<Decimal> {
    from_base_units(wei, NATIVE_DECIMALS)
}

/// Decode a calculator price scaled by 10^18
pub fn price_from_fixed_point(raw: U256) -> Result<Decimal> {
    from_base_units(raw, PRICE_DECIMALS)
}

/// `amount * (100 - slippage) / 100`, exact
pub fn apply_slippage(amount: Decimal, slippage_percent: Decimal) -> Result<Decimal> {
    let hundred = Decimal::ONE_HUNDRED;
    if slippage_percent.is_sign_negative() || slippage_percent >= hundred {
        return Err(BotError::InvalidAmount.into());
    }
    amount
        .checked_mul(hundred - slippage_percent)
        .and_then(|scaled| scaled.checked_div(hundred))
        .ok_or_else(|| BotError::AmountOverflow(amount.to_string()).into())
}

pub fn with_gas_margin(estimated_gas: u64) -> u64 {
    estimated_gas.saturating_mul(100 + GAS_LIMIT_MARGIN_PERCENT) / 100
}
