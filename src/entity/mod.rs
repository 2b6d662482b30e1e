mod account;
mod bot_error;
mod market_info;
mod swap;
mod swap_result;
mod token;
mod token_balance;

pub use account::Account;
pub use bot_error::{is_retryable, BotError};
pub use market_info::{MarketInfo, VerifiedMarket};
pub use swap::{SwapRequest, DEFAULT_SLIPPAGE_PERCENT};
pub use swap_result::SwapResult;
pub use token::{Token, TokenKind};
pub use token_balance::TokenBalance;
