use crate::entity::Token;
use alloy::primitives::{address, Address};
use lazy_static::lazy_static;

// Network defaults
pub const DEFAULT_RPC_URL: &str = "https://testnet-rpc.monad.xyz";
pub const DEFAULT_EXPLORER_URL: &str = "https://testnet.monadexplorer.com/tx/";

// Kuru contracts
pub const KURU_ROUTER: Address = address!("c816865f172d640d93712c68a7e1f83f3fa63235");
pub const KURU_PRICE_CALCULATOR: Address = address!("24ddc1c2f7dfe7a3482f5da937bfcc2373c1368f");

// Known token contracts
pub const WMON_CONTRACT: Address = address!("760afe86e5de5fa0ee542fc7b7b713e1c5425701");
pub const SHMON_CONTRACT: Address = address!("3a98250f98dd388c211206983453837c8365bdc1");
pub const DAK_CONTRACT: Address = address!("0f0bdebf0f83cd1ee3974779bcb7315f9808c714");
pub const CHOG_CONTRACT: Address = address!("e0590015a873bf326bd645c3e1266d4db41c4e6b");
pub const USDC_CONTRACT: Address = address!("f817257fed379853cde0fa4f97ab987181b1e5ea");

// Define token decimals
pub const NATIVE_DECIMALS: u8 = 18;
pub const USDC_DECIMALS: u8 = 6;
pub const PRICE_DECIMALS: u8 = 18;

pub const NATIVE_SYMBOL: &str = "MON";

lazy_static! {
    /// Tokens the bot trades, in selection order
    pub static ref AVAILABLE_TOKENS: Vec<Token> = vec![
        Token::native(NATIVE_SYMBOL, NATIVE_DECIMALS),
        Token::erc20("SHMON", SHMON_CONTRACT, 18),
        Token::erc20("DAK", DAK_CONTRACT, 18),
        Token::erc20("CHOG", CHOG_CONTRACT, 18),
        Token::erc20("USDC", USDC_CONTRACT, USDC_DECIMALS),
        Token::wrapped_native("WMON", WMON_CONTRACT, NATIVE_DECIMALS),
    ];

    /// Kuru MON markets keyed by the non-native symbol
    pub static ref MON_POOLS: Vec<(&'static str, Address)> = vec![
        ("USDC", address!("d3af145f1aa1a471b5f0f62c52cf8fcdc9ab55d3")),
        ("DAK", address!("94b72620e65577de5fb2b8a8b93328caf6ca161b")),
        ("SHMON", address!("3109f8d6425a3f0c1ea26e711b873d8663e13181")),
        ("CHOG", address!("277bf4a0aac16f19d7bf592feffc8d2d9a890508")),
    ];

    /// Consolidation thresholds in token units; anything at or below is left alone
    pub static ref CONSOLIDATE_THRESHOLDS: Vec<(&'static str, &'static str)> = vec![
        ("WMON", "0.01"),
        ("WETH", "0.0001"),
        ("WSOL", "0.001"),
        ("USDT", "0.01"),
        ("WBTC", "0.000001"),
        ("MAD", "0.01"),
        ("USDC", "0.01"),
    ];
}

pub const DEFAULT_CONSOLIDATE_THRESHOLD: &str = "0.0000001";
