use crate::entity::{BotError, Token};
use crate::monad::tokens::constants::{AVAILABLE_TOKENS, MON_POOLS};
use alloy::primitives::Address;
use anyhow::Result;
use std::collections::{HashMap, HashSet};

/// Symbol -> token table plus the native-asset pool for every tradable token.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
    pools: HashMap<String, Address>,
    native_index: usize,
}

impl TokenRegistry {
    pub fn new(tokens: Vec<Token>, pools: HashMap<String, Address>) -> Result<Self> {
        let mut symbols = HashSet::new();
        for token in &tokens {
            if !symbols.insert(token.symbol.as_str()) {
                return Err(BotError::Config(format!("duplicate token {}", token.symbol)).into());
            }
            if !token.is_native() && token.address == Address::ZERO {
                return Err(
                    BotError::Config(format!("token {} has no contract address", token.symbol))
                        .into(),
                );
            }
        }

        let natives: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.is_native())
            .map(|(index, _)| index)
            .collect();
        let native_index = match natives.as_slice() {
            [index] => *index,
            _ => {
                return Err(BotError::Config(format!(
                    "expected exactly one native token, found {}",
                    natives.len()
                ))
                .into())
            }
        };

        for symbol in pools.keys() {
            match tokens.iter().find(|token| &token.symbol == symbol) {
                Some(token) if token.is_native() => {
                    return Err(
                        BotError::Config(format!("native token {} cannot have a pool", symbol))
                            .into(),
                    )
                }
                Some(_) => {}
                None => {
                    return Err(
                        BotError::Config(format!("pool registered for unknown token {}", symbol))
                            .into(),
                    )
                }
            }
        }

        Ok(Self {
            tokens,
            pools,
            native_index,
        })
    }

    /// Built-in Monad testnet tokens and Kuru pools
    pub fn monad_testnet() -> Result<Self> {
        let pools = MON_POOLS
            .iter()
            .map(|(symbol, pool)| (symbol.to_string(), *pool))
            .collect();
        Self::new(AVAILABLE_TOKENS.clone(), pools)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn native(&self) -> &Token {
        &self.tokens[self.native_index]
    }

    pub fn get(&self, symbol: &str) -> Result<&Token> {
        self.tokens
            .iter()
            .find(|token| token.symbol == symbol)
            .ok_or_else(|| BotError::UnknownToken(symbol.to_string()).into())
    }

    pub fn non_native(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| !token.is_native())
    }

    /// Tokens the router can buy with the native asset
    pub fn swap_targets(&self) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|token| !token.is_native() && !token.is_wrapped_native())
            .collect()
    }

    /// Pool of the native-asset market for this pair
    pub fn pool_for_pair(&self, from: &Token, to: &Token) -> Result<Address> {
        let key = match (from.is_native(), to.is_native()) {
            (true, false) => &to.symbol,
            (false, true) => &from.symbol,
            _ => {
                return Err(BotError::UnsupportedPair {
                    from: from.symbol.clone(),
                    to: to.symbol.clone(),
                }
                .into())
            }
        };

        self.pools.get(key).copied().ok_or_else(|| {
            BotError::PoolNotFound {
                from: from.symbol.clone(),
                to: to.symbol.clone(),
            }
            .into()
        })
    }
}
