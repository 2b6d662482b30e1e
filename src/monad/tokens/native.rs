use crate::entity::Token;
use crate::monad::abi::IWrappedNative;
use crate::monad::client::{ChainClient, ReceiptSummary};
use crate::monad::tokens::transaction::TransactionSender;
use crate::monad::utils::wei_to_native;
use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use anyhow::Result;
use rust_decimal::Decimal;

/// Get MON balance
pub async fn get_native_balance(client: &dyn ChainClient, owner: Address) -> Result<Decimal> {
    let wei = client.native_balance(owner).await?;

    // Convert from wei to MON
    wei_to_native(wei)
}

/// Unwrap wrapped MON straight on its contract, the router is not involved
pub async fn unwrap_native(
    sender: &TransactionSender,
    wrapped: &Token,
    amount: U256,
) -> Result<ReceiptSummary> {
    let calldata = IWrappedNative::withdrawCall { amount }.abi_encode();
    sender.send(wrapped.address, calldata, U256::ZERO).await
}
