use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapResult {
    pub source_token: String,
    pub target_token: String,
    pub amount_in: Decimal,
    pub amount_out: Decimal, // Expected output at the quoted price
    pub tx_hash: Option<String>,
    pub success: bool,
    pub error_message: Option<String>,
}

impl SwapResult {
    pub fn succeeded(
        source_token: &str,
        target_token: &str,
        amount_in: Decimal,
        amount_out: Decimal,
        tx_hash: String,
    ) -> Self {
        Self {
            source_token: source_token.to_string(),
            target_token: target_token.to_string(),
            amount_in,
            amount_out,
            tx_hash: Some(tx_hash),
            success: true,
            error_message: None,
        }
    }

    pub fn failed(
        source_token: &str,
        target_token: &str,
        amount_in: Decimal,
        error_message: String,
    ) -> Self {
        Self {
            source_token: source_token.to_string(),
            target_token: target_token.to_string(),
            amount_in,
            amount_out: Decimal::ZERO,
            tx_hash: None,
            success: false,
            error_message: Some(error_message),
        }
    }
}
