use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Chain currency, no contract behind it
    Native,
    Erc20,
    /// ERC-20 wrapper around the native currency, unwrapped with `withdraw`
    WrappedNative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,   // Token symbol (e.g. "MON", "USDC")
    pub address: Address, // Contract address, zero address for the native token
    pub decimals: u8,     // Number of decimal places
    pub kind: TokenKind,
}

impl Token {
    pub fn native(symbol: &str, decimals: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            address: Address::ZERO,
            decimals,
            kind: TokenKind::Native,
        }
    }

    pub fn erc20(symbol: &str, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            address,
            decimals,
            kind: TokenKind::Erc20,
        }
    }

    pub fn wrapped_native(symbol: &str, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            address,
            decimals,
            kind: TokenKind::WrappedNative,
        }
    }

    pub fn is_native(&self) -> bool {
        self.kind == TokenKind::Native
    }

    pub fn is_wrapped_native(&self) -> bool {
        self.kind == TokenKind::WrappedNative
    }
}
