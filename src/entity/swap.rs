use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SLIPPAGE_PERCENT: Decimal = Decimal::ONE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub source_token: String,
    pub target_token: String,
    pub amount: Decimal,
    pub slippage: Decimal, // Percent, 1.0 means 1%
}

impl SwapRequest {
    pub fn new(source_token: &str, target_token: &str, amount: Decimal) -> Self {
        Self {
            source_token: source_token.to_string(),
            target_token: target_token.to_string(),
            amount,
            slippage: DEFAULT_SLIPPAGE_PERCENT,
        }
    }

    pub fn with_slippage(mut self, slippage: Decimal) -> Self {
        self.slippage = slippage;
        self
    }
}
