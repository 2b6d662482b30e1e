// Re-export everything from submodules
pub mod abi;
pub mod client;
#[cfg(test)]
pub mod mock;
pub mod tokens;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::{create_monad_client, ChainClient, ReceiptSummary, RpcChainClient};
pub use tokens::{TokenRegistry, TransactionSender};
pub use wallet::{checksum, signer_from_hex};
