// Re-export submodules
pub mod constants;
pub mod erc20;
pub mod native;
pub mod registry;
pub mod transaction;

// Re-export commonly used items
pub use constants::{KURU_PRICE_CALCULATOR, KURU_ROUTER, NATIVE_SYMBOL};
pub use erc20::{ensure_allowance, get_token_balance};
pub use native::{get_native_balance, unwrap_native};
pub use registry::TokenRegistry;
pub use transaction::TransactionSender;
